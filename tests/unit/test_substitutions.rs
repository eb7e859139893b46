use retab::core::pipeline::{transform, transform_with, Pipeline};
use retab::core::rule::{self, builtin, SubstitutionRule};
use retab::core::Document;

fn rules(ids: &[&str]) -> Vec<SubstitutionRule> {
    ids.iter().map(|id| builtin(id).unwrap()).collect()
}

#[test]
fn test_header_scenario_step_by_step() {
    let input = Document::new("# Gene Family:Name\nA:B|C\n");

    let (after_colon, _) = transform(&input, &rules(&[rule::COLON]));
    assert_eq!(after_colon.as_str(), "# Gene Family\tName\nA\tB|C\n");

    let (after_title, _) = transform(&after_colon, &rules(&[rule::TITLE]));
    assert_eq!(
        after_title.as_str(),
        "Gene Family\tName+Organism\tName\nA\tB|C\n"
    );
}

#[test]
fn test_relab_rules_in_one_pass() {
    let input = Document::new("# Gene Family:Name\nA:B|C\n");
    let (output, report) = transform(&input, &Pipeline::relab().rules);

    assert_eq!(output.as_str(), "Gene Family\tName+Organism\tName\nA\tB|C\n");
    let counts: Vec<usize> = report.outcomes.iter().map(|o| o.replacements).collect();
    assert_eq!(counts, vec![2, 1]);
}

#[test]
fn test_cpm_suffix_is_stripped() {
    let input = Document::new("GeneFamily_Abundance-CPM\tSample1");
    let (output, _) = transform(&input, &rules(&[rule::CPM_SUFFIX]));
    assert_eq!(output.as_str(), "GeneFamily\tSample1");
}

#[test]
fn test_cpm_pipeline_on_realistic_table() {
    let input = Document::new(
        "# Gene Family\tS1_Abundance-CPM\tS2_Abundance-CPM\n\
         1.1.1.1: Alcohol dehydrogenase\t12.5\t3.0\n\
         1.1.1.1: Alcohol dehydrogenase|g__Bacteroides.s__Bacteroides_ovatus\t4.0\t0.0\n",
    );
    let (output, _) = transform(&input, &Pipeline::cpm().rules);
    assert_eq!(
        output.as_str(),
        "Gene Family\tName+Organism\tS1\tS2\n\
         1.1.1.1\t Alcohol dehydrogenase\t12.5\t3.0\n\
         1.1.1.1\t Alcohol dehydrogenase|g__Bacteroides.s__Bacteroides_ovatus\t4.0\t0.0\n"
    );
}

#[test]
fn test_vertical_bar_is_opt_in() {
    let input = Document::new("A:B|C\n");
    let (default_output, _) = transform(&input, &Pipeline::relab().rules);
    assert!(default_output.as_str().contains('|'));

    let mut pipeline = Pipeline::relab();
    pipeline.enable(builtin(rule::VERTICAL_BAR).unwrap());
    let (output, _) = transform(&input, &pipeline.rules);
    assert_eq!(output.as_str(), "A\tB\tC\n");
}

#[test]
fn test_text_without_patterns_is_unchanged() {
    let text = "Gene\tSample1\tSample2\nK00001\t0.1\t0.2\n";
    let (output, report) = transform(&Document::new(text), &rules(&[
        rule::COLON,
        rule::TITLE,
        rule::CPM_SUFFIX,
    ]));
    assert_eq!(output.as_str(), text);
    assert_eq!(report.total_replacements(), 0);
}

#[test]
fn test_transform_is_deterministic() {
    let input = Document::new("# Gene Family:x\na:b:c_Abundance-CPM\n");
    let all = Pipeline::cpm().rules;
    let (first, first_report) = transform(&input, &all);
    let (second, second_report) = transform(&input, &all);
    assert_eq!(first, second);
    assert_eq!(first_report, second_report);
}

#[test]
fn test_replacement_text_is_not_rematched_by_earlier_rules() {
    // The title replacement introduces no colon, so running colon again changes nothing.
    let input = Document::new("# Gene Family:Name\n");
    let (output, _) = transform(&input, &Pipeline::relab().rules);
    let (again, report) = transform(&output, &rules(&[rule::COLON]));
    assert_eq!(output, again);
    assert_eq!(report.total_replacements(), 0);
}

#[test]
fn test_line_count_is_preserved() {
    let input = Document::new("# Gene Family:a\nb:c\n\nd_Abundance-CPM|e\nlast line");
    let mut pipeline = Pipeline::cpm();
    pipeline.enable(builtin(rule::VERTICAL_BAR).unwrap());
    let (output, _) = transform(&input, &pipeline.rules);
    assert_eq!(output.newline_count(), input.newline_count());
    assert_eq!(output.as_str().lines().count(), input.as_str().lines().count());
}

#[test]
fn test_transform_with_reports_each_rule_in_order() {
    let mut labels = Vec::new();
    transform_with(&Document::new("x"), &Pipeline::cpm().rules, |outcome| {
        labels.push(outcome.label.clone())
    });
    assert_eq!(
        labels,
        vec!["Replace colon", "Replace title", "Remove CPM suffix"]
    );
}

#[test]
fn test_custom_regex_rule_in_sequence() {
    let strip_taxa = SubstitutionRule::regex("taxa", "Strip taxa", r"\|g__[^\t\n]*", "").unwrap();
    let mut all = rules(&[rule::COLON]);
    all.push(strip_taxa);

    let input = Document::new("1.1.1.1:ADH|g__Bacteroides.s__ovatus\t4.0\n");
    let (output, _) = transform(&input, &all);
    assert_eq!(output.as_str(), "1.1.1.1\tADH\t4.0\n");
}
