use std::collections::HashSet;
use std::io::Write;

use wildfire_dilemmas::scenario::{Recommendation, ScenarioCatalog, UserChoice, ValueLabel};
use wildfire_dilemmas::CatalogError;

fn catalog() -> ScenarioCatalog {
    ScenarioCatalog::builtin().expect("bundled dataset must validate")
}

#[test]
fn test_every_scenario_has_unique_non_empty_options() {
    for scenario in catalog().scenarios() {
        assert!(!scenario.options.is_empty(), "scenario {} has no options", scenario.id);
        let ids: HashSet<&str> = scenario.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids.len(), scenario.options.len(), "duplicate option ids in {}", scenario.id);
    }
}

#[test]
fn test_every_option_has_full_expert_panel() {
    for scenario in catalog().scenarios() {
        for option in &scenario.options {
            let labels: Vec<ValueLabel> = option.expert_opinions.iter().map(|(l, _)| l).collect();
            assert_eq!(labels, ValueLabel::ALL.to_vec());
            for (_, opinion) in option.expert_opinions.iter() {
                assert!(matches!(opinion.recommendation, Recommendation::Accept | Recommendation::Reject));
                assert!(!opinion.summary.is_empty());
            }
        }
    }
}

#[test]
fn test_radar_scores_and_counts_in_range() {
    for scenario in catalog().scenarios() {
        for option in &scenario.options {
            for (axis, score) in option.radar_data.axes() {
                assert!((0.0..=100.0).contains(&score), "{}/{} {} = {}", scenario.id, option.id, axis, score);
            }
            assert!(option.impact.lives_saved >= 0);
            assert!(option.impact.human_casualties >= 0);
        }
    }
}

#[test]
fn test_scenario_one_safety_first_impact() {
    let catalog = catalog();
    let option = catalog.get_option(1, "safety-first").unwrap();
    assert_eq!(option.impact.lives_saved, 2000);
    assert_eq!(option.impact.human_casualties, 12);
    assert_eq!(option.label, ValueLabel::Safety);
}

#[test]
fn test_scenario_two_lives_saved_in_order() {
    let catalog = catalog();
    let scenario = catalog.get_scenario(2).unwrap();
    let pairs: Vec<(&str, i64)> = scenario
        .options
        .iter()
        .map(|o| (o.id.as_str(), o.impact.lives_saved))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("nuclear-safety-priority", 400),
            ("evacuation-priority", 1800),
            ("divided-response-strategy", 1500),
        ]
    );
}

#[test]
fn test_missing_scenario_is_not_found() {
    match catalog().get_scenario(99) {
        Err(CatalogError::ScenarioNotFound { scenario_id }) => assert_eq!(scenario_id, 99),
        other => panic!("expected not found, got {:?}", other.map(|s| s.id)),
    }
}

#[test]
fn test_bundled_comparisons_contrast() {
    for scenario in catalog().scenarios() {
        for option in &scenario.options {
            let table = &option.comparison_table_column_content;
            assert_eq!(table.first_user_choice, UserChoice::Accepted);
            assert_eq!(table.second_user_choice, UserChoice::Rejected);
            assert_eq!(table.first_value, option.cvr_question.value);
        }
    }
}

#[test]
fn test_bundled_population_warnings() {
    let catalog = catalog();
    let flagged: Vec<&str> = catalog
        .report()
        .warnings
        .iter()
        .map(|w| w.option_id.as_str())
        .collect();
    assert_eq!(flagged, vec!["safety-first", "urban-defense"]);
}

#[test]
fn test_comparison_rows_trim_cells() {
    let catalog = catalog();
    let option = catalog.get_option(2, "evacuation-priority").unwrap();
    let rows = option.comparison_table_column_content.rows();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].second, "Evacuate or Shield?");
    assert_eq!(rows[3].first, "2000");
    assert_eq!(rows[5].first, "Accepted");
}

#[test]
fn test_load_yaml_from_disk() {
    let yaml = r#"
- id: 10
  title: Ridge fire
  description: A fire on the ridge.
  options:
    - id: hold-line
      title: Hold the line
      label: efficiency
      description: Keep crews on the ridge.
      impact:
        livesSaved: 80
        humanCasualties: 20
        firefightingResource: -30
        infrastructureCondition: -10
        biodiversityCondition: -20
        propertiesCondition: -5
        nuclearPowerStation: 0
      riskInfo: ["Crews exposed"]
      expertOpinions:
        safety: { summary: s, recommendation: Reject, comparison: c, confidence: Moderate }
        efficiency: { summary: s, recommendation: Accept, comparison: c, confidence: High }
        sustainability: { summary: s, recommendation: Accept, comparison: c, confidence: High }
        fairness: { summary: s, recommendation: Reject, comparison: c, confidence: Low }
        nonmaleficence: { summary: s, recommendation: Reject, comparison: c, confidence: Low }
      radarData:
        fireContainment: 60
        firefighterRisk: 70
        resourceUse: 40
        infrastructureDamage: 10
        biodiversityImpact: 20
        ethicalFairness: 50
        populationSafety: 80
      cvrQuestion:
        descriptionTile: Flood barrier
        description: A river threatens a village.
        question: Would you keep the crews on the barrier?
        value: Efficiency
      comparisonTableColumnContent:
        firstColumnTitle: Ridge fire
        firstColumnSelectedPreference: Hold the line
        firstValue: Efficiency
        firstColumnAffected: 100
        firstColumnRisk: 20 casualties
        firstColumnuserChoice: Accepted
        secondColumnTitle: Flood barrier
        secondColumnSelectedPreference: Keep crews on the barrier
        secondValue: Efficiency
        secondColumnaffected: 100
        secondColumnRisk: 20 casualties
        secondColumnuserChoice: Rejected
"#;
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let catalog = ScenarioCatalog::from_path(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    let option = catalog.get_option(10, "hold-line").unwrap();
    assert_eq!(option.expert_opinions.accept_count(), 2);
    assert!(catalog.report().warnings.is_empty());
}

#[test]
fn test_invalid_file_is_rejected_whole() {
    let json = r#"[{"id": 1, "title": "T", "description": "D", "options": []}]"#;
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    match ScenarioCatalog::from_path(file.path()) {
        Err(CatalogError::SchemaViolation { scenario_id, field, .. }) => {
            assert_eq!(scenario_id, 1);
            assert_eq!(field, "options");
        }
        other => panic!("expected schema violation, got {:?}", other),
    }
}

#[test]
fn test_unknown_extension_rejected() {
    let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    assert!(matches!(
        ScenarioCatalog::from_path(file.path()),
        Err(CatalogError::UnsupportedFormat(_))
    ));
}

// The catalog handle is shared read-only across request handlers.
#[test]
fn test_catalog_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<ScenarioCatalog>();
}
