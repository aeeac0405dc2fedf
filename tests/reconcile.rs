use std::collections::HashSet;

use cucumber_plan::{
    Composer, ExecutionMode, PlanConfig, PlanError, Planner, ScopeKind,
    ScopeMetadata, ScopePlan, Status, TestPlan,
    document::Feature,
    error::{ReconcileError, ScopeResult},
    plan::{FeatureChild, RuleChild},
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn meta() -> ScopeMetadata {
    ScopeMetadata::new()
}

fn feature(name: &str) -> Feature {
    Feature::parse_path(format!("tests/features/{name}.feature")).unwrap()
}

fn compose(f: impl FnOnce(&mut Composer) -> ScopeResult<()>) -> ScopePlan {
    let mut composer = Composer::new();
    f(&mut composer).unwrap();
    composer.into_plan().unwrap()
}

fn calculator() -> ScopePlan {
    compose(|c| {
        let _ = c.feature("Calculator", meta(), |c| {
            let _ = c.scenario("adds", meta().tags(["fast"]), |c| {
                let _ = c.given("I have entered {int} into the calculator")?;
                let _ = c.when("I press add")?;
                let _ = c.then("the result should be {int} on the screen")?;
                Ok(())
            })?;
            let _ = c.scenario_outline(
                "multiplies <a> by <b>",
                meta().mode(ExecutionMode::Concurrent),
                |c| {
                    let _ = c.given("I have entered {int} into the calculator")?;
                    let _ = c.when("I press multiply")?;
                    let _ =
                        c.then("the result should be {int} on the screen")?;
                    Ok(())
                },
            )?;
            Ok(())
        })?;
        Ok(())
    })
}

fn shop(members_first: bool) -> ScopePlan {
    fn guests(c: &mut Composer) -> ScopeResult<()> {
        let _ = c.rule("Guests", meta(), |c| {
            let _ = c.given("a guest")?;
            let _ = c.scenario("Checkout", meta(), |c| {
                let _ = c.when("I check out")?;
                let _ = c.then("I am asked to sign up")?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    }
    fn members(c: &mut Composer) -> ScopeResult<()> {
        let _ = c.rule("Members", meta(), |c| {
            let _ = c.given("a member")?;
            let _ = c.scenario("Checkout", meta(), |c| {
                let _ = c.when("I check out")?;
                let _ = c.then("I am charged")?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    }

    compose(|c| {
        let _ = c.feature("Shop", meta(), |c| {
            let _ = c.given("a shop")?;
            if members_first {
                members(c)?;
                guests(c)
            } else {
                guests(c)?;
                members(c)
            }
        })?;
        Ok(())
    })
}

fn plan(doc: &Feature, scopes: &ScopePlan) -> Result<TestPlan, PlanError> {
    init_tracing();
    Planner::new(PlanConfig::default()).plan(doc, scopes)
}

#[test]
fn calculator_resolves_ordered_steps() {
    let doc = feature("calculator");
    let scopes = calculator();
    let plan = plan(&doc, &scopes).unwrap();

    assert_eq!(plan.len(), doc.count_executables());
    assert_eq!(plan.len(), 4);

    let adds = &plan.list_executables()[0];
    assert_eq!(adds.name, "adds");
    let patterns: Vec<_> = adds.steps.iter().map(|s| s.source()).collect();
    assert_eq!(
        patterns,
        [
            "I have entered {int} into the calculator",
            "I press add",
            "the result should be {int} on the screen",
        ],
    );
    assert_eq!(adds.tags, ["math", "fast"]);
    assert_eq!(adds.mode, ExecutionMode::Default);
}

#[test]
fn outline_examples_are_ordered_with_payloads() {
    let doc = feature("calculator");
    let scopes = calculator();
    let plan = plan(&doc, &scopes).unwrap();

    let examples = &plan.list_executables()[1..];
    let ids: Vec<_> = examples.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "scenarioOutline-1#1",
            "scenarioOutline-1#2",
            "scenarioOutline-1#3",
        ],
    );

    let names: Vec<_> = examples.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        ["multiplies 2 by 3", "multiplies 4 by 5", "multiplies 100 by 100"],
    );

    let small = examples[0].example.as_ref().unwrap();
    assert_eq!(small.group.name, "small");
    assert!(small.group.tags.is_empty());

    let large = &examples[2];
    assert_eq!(large.mode, ExecutionMode::Concurrent);
    assert_eq!(large.tags, ["math", "table", "large"]);
    assert_eq!(large.gherkin_steps[3].text, "the result should be 10000 on the screen");
    let example = large.example.as_ref().unwrap();
    assert_eq!(example.index, 2);
    assert_eq!(example.group.name, "large");
    assert_eq!(example.group.tags, ["large"]);
    assert_eq!(example.values["product"], "10000");
    assert_eq!(
        large.qualified_name,
        "Feature: Calculator [feature-1] > \
         Scenario Outline: multiplies 100 by 100 [scenarioOutline-1#3]",
    );

    let FeatureChild::Outline(outline) = &plan.feature().children[1] else {
        panic!("expected an outline");
    };
    assert_eq!(outline.scope.kind, ScopeKind::ScenarioOutline);
    assert_eq!(outline.examples.len(), 3);
}

#[test]
fn same_named_scenarios_pair_within_their_rules() {
    let doc = feature("checkout");

    for members_first in [false, true] {
        let scopes = shop(members_first);
        let plan = plan(&doc, &scopes).unwrap();
        assert_eq!(plan.len(), 2);

        let FeatureChild::Rule(guests) = &plan.feature().children[0] else {
            panic!("expected a rule");
        };
        assert_eq!(guests.name, "Guests");
        assert_eq!(guests.scope.as_ref().unwrap().name, "Guests");
        let RuleChild::Scenario(checkout) = &guests.children[0] else {
            panic!("expected a scenario");
        };
        assert_eq!(checkout.summary.rule.as_ref().unwrap().name, "Guests");

        let patterns: Vec<_> =
            checkout.steps.iter().map(|s| s.source()).collect();
        assert_eq!(
            patterns,
            ["a shop", "a guest", "I check out", "I am asked to sign up"],
        );

        let charged = &plan.list_executables()[1];
        assert_eq!(charged.summary.rule.as_ref().unwrap().name, "Members");
        assert_eq!(charged.steps[3].source(), "I am charged");
    }
}

#[test]
fn empty_scenario_is_planned() {
    let doc = Feature::parse_str("Feature: Lists\n  Scenario: empty\n").unwrap();
    let scopes = compose(|c| {
        let _ = c.feature("Lists", meta(), |c| {
            let _ = c.scenario("empty", meta(), |_| Ok(()))?;
            Ok(())
        })?;
        Ok(())
    });

    let plan = plan(&doc, &scopes).unwrap();
    assert_eq!(plan.len(), 1);

    let empty = &plan.list_executables()[0];
    assert_eq!(empty.name, "empty");
    assert!(empty.steps.is_empty());
    assert!(empty.gherkin_steps.is_empty());
    assert!(empty.summary.steps.is_empty());
}

#[test]
fn leftover_scopes_are_reported() {
    let doc = Feature::parse_str(
        "Feature: Lists\n\
         \x20 Rule: R\n\
         \x20   Scenario: X\n",
    )
    .unwrap();
    let scopes = compose(|c| {
        let _ = c.feature("Lists", meta(), |c| {
            let _ = c.rule("R", meta(), |c| {
                let _ = c.scenario("X", meta(), |_| Ok(()))?;
                let _ = c.scenario("X", meta(), |_| Ok(()))?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    });

    let err = plan(&doc, &scopes).unwrap_err();
    assert!(
        matches!(err, PlanError::Reconcile(ReconcileError::Unmatched { .. })),
        "{err}",
    );
    let msg = err.to_string();
    assert!(msg.contains("were not matched"), "{msg}");
    assert!(msg.contains("scenario \"X\" [scenario-2]"), "{msg}");
}

#[test]
fn unregistered_scenario_is_reported() {
    let doc = Feature::parse_str(
        "Feature: Calculator\n  Scenario: divides\n    When I press divide\n",
    )
    .unwrap();
    let scopes = calculator();

    let err = plan(&doc, &scopes).unwrap_err();
    let PlanError::Reconcile(ReconcileError::MissingScope { kind, name, .. }) =
        &err
    else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(*kind, ScopeKind::Scenario);
    assert_eq!(name, "divides");
}

#[test]
fn plans_have_unique_identities_and_rebuild_identically() {
    let doc = feature("calculator");
    let scopes = calculator();
    let first = plan(&doc, &scopes).unwrap();
    let second = plan(&doc, &scopes).unwrap();

    let ids: HashSet<_> =
        first.list_executables().iter().map(|e| e.id.clone()).collect();
    let names: HashSet<_> = first
        .list_executables()
        .iter()
        .map(|e| e.qualified_name.clone())
        .collect();
    assert_eq!(ids.len(), first.len());
    assert_eq!(names.len(), first.len());

    let shape = |plan: &TestPlan| {
        plan.list_executables()
            .iter()
            .map(|e| (e.qualified_name.clone(), e.steps.len()))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&first), shape(&second));

    for execution in first.list_executables() {
        assert_eq!(execution.gherkin_steps.len(), execution.steps.len());
        assert!(
            first.find_by_qualified_name(&execution.qualified_name).is_some(),
        );
        assert!(first.find_by_id(&execution.id).is_some());
    }
}

#[test]
fn results_are_tracked_per_plan() {
    let doc = feature("calculator");
    let scopes = calculator();
    let plan = plan(&doc, &scopes).unwrap();

    let adds = plan.find_by_id("scenario-1").unwrap();
    adds.mark_started();
    adds.mark_failed("expected 120, got 100");

    let failed = plan.list_failed();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].id, "scenario-1");
    assert_eq!(adds.status(), Status::Failed);

    let rebuilt = self::plan(&doc, &scopes).unwrap();
    assert!(rebuilt.list_failed().is_empty());
}
