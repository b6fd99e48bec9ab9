use std::collections::HashMap;

use papersum::application::services::{
    DEFAULT_PROMPT_TEMPLATE, FALLBACK_BANNER, PREPRINT_METRIC, PromptFrame, build_prompt,
    combine_part_summaries, consolidation_prompt, fallback_body, format_summary,
    template_embeds_paper_text,
};
use papersum::domain::{Chunk, DocumentMetadata};

fn sample_metadata() -> DocumentMetadata {
    DocumentMetadata::new("Gut Microbiome Dynamics")
        .with_authors(["Ada Lovelace", "Alan Turing"])
        .with_abstract("We track microbial communities over time.")
        .with_publication_date("2024-03-01")
        .with_identifier("10.1101/2024.03.01.123456")
}

#[test]
fn given_upper_and_lower_case_placeholders_when_building_then_both_resolve() {
    let result = build_prompt("{TITLE} | {title} | {Title}", &sample_metadata(), &HashMap::new());
    assert_eq!(
        result,
        "Gut Microbiome Dynamics | Gut Microbiome Dynamics | Gut Microbiome Dynamics"
    );
}

#[test]
fn given_unknown_placeholder_when_building_then_inserts_visible_marker() {
    let result = build_prompt("Funding: {Funding}", &sample_metadata(), &HashMap::new());
    assert_eq!(result, "Funding: {placeholder 'Funding' not available}");
}

#[test]
fn given_non_identifier_placeholder_when_building_then_inserts_marker() {
    let result = build_prompt(
        "A {first-author} B {Paper Title} C {Title}",
        &sample_metadata(),
        &HashMap::new(),
    );

    assert_eq!(
        result,
        "A {placeholder 'first-author' not available} B {placeholder 'Paper Title' not available} C Gut Microbiome Dynamics"
    );
}

#[test]
fn given_padded_placeholder_name_when_building_then_resolves_trimmed_name() {
    let result = build_prompt("{ title } on { Date }", &sample_metadata(), &HashMap::new());
    assert_eq!(result, "Gut Microbiome Dynamics on 2024-03-01");
}

#[test]
fn given_extra_value_when_building_then_overrides_metadata() {
    let mut extra = HashMap::new();
    extra.insert("title".to_string(), "Override".to_string());

    let result = build_prompt("{TITLE}", &sample_metadata(), &extra);

    assert_eq!(result, "Override");
}

#[test]
fn given_every_known_placeholder_when_building_then_none_remain_unresolved() {
    let names = [
        "title",
        "authors",
        "abstract",
        "date",
        "doi",
        "identifier",
        "journal",
        "url",
        "category",
        "version",
        "license",
        "impact_factor",
        "citation_count",
    ];
    let template = names
        .iter()
        .map(|n| format!("{{{}}} {{{}}}", n, n.to_uppercase()))
        .collect::<Vec<_>>()
        .join("\n");

    let result = build_prompt(&template, &sample_metadata(), &HashMap::new());

    for name in names {
        assert!(!result.contains(&format!("{{{}}}", name)));
        assert!(!result.contains(&format!("{{{}}}", name.to_uppercase())));
    }
    assert!(!result.contains("not available"));
}

#[test]
fn given_identifier_when_building_url_then_links_to_resolver() {
    let result = build_prompt("{url}", &sample_metadata(), &HashMap::new());
    assert_eq!(result, "https://doi.org/10.1101/2024.03.01.123456");
}

#[test]
fn given_preprint_when_building_metrics_then_uses_documented_default() {
    let result = build_prompt("{impact_factor}/{citation_count}", &sample_metadata(), &HashMap::new());
    assert_eq!(result, format!("{}/{}", PREPRINT_METRIC, PREPRINT_METRIC));
}

#[test]
fn given_value_containing_braces_when_building_then_value_is_not_rescanned() {
    let metadata = DocumentMetadata::new("Sets {x} and {title}");
    let result = build_prompt("T: {title}", &metadata, &HashMap::new());
    assert_eq!(result, "T: Sets {x} and {title}");
}

#[test]
fn given_missing_metadata_when_building_then_uses_placeholders() {
    let result = build_prompt("{date} / {doi} / {authors}", &DocumentMetadata::default(), &HashMap::new());
    assert_eq!(result, "Unknown Date / No DOI available / Unknown Authors");
}

#[test]
fn given_default_template_when_inspecting_then_has_five_sections() {
    let sections = DEFAULT_PROMPT_TEMPLATE
        .lines()
        .filter(|line| line.starts_with("## "))
        .count();
    assert_eq!(sections, 5);
    assert!(DEFAULT_PROMPT_TEMPLATE.contains("## 4. Critical Analysis"));
}

#[test]
fn given_template_without_paper_text_when_rendering_chunk_then_appends_full_text() {
    let metadata = sample_metadata();
    let frame = PromptFrame::new(DEFAULT_PROMPT_TEMPLATE, &metadata);
    let chunk = Chunk::new("chunk body".to_string(), 1, 3, 0);

    let prompt = frame.for_chunk(&chunk);

    assert!(prompt.contains("# Expert Analysis: Gut Microbiome Dynamics"));
    assert!(prompt.contains("Paper Metadata:\nTitle: Gut Microbiome Dynamics"));
    assert!(prompt.contains("Note: This is part 2 of 3 of the paper."));
    assert!(prompt.ends_with("Full Text:\nchunk body"));
}

#[test]
fn given_template_with_paper_text_when_rendering_then_body_is_embedded_once() {
    let metadata = sample_metadata();
    let template = "Summarize {title}:\n{PAPER_TEXT}\nEnd.";
    assert!(template_embeds_paper_text(template));
    let frame = PromptFrame::new(template, &metadata);

    let prompt = frame.single_pass("the body");

    assert!(prompt.starts_with("Summarize Gut Microbiome Dynamics:\nthe body\nEnd."));
    assert!(!prompt.contains("Full Text:"));
    assert_eq!(prompt.matches("the body").count(), 1);
}

#[test]
fn given_frame_when_taking_prefix_then_body_is_absent() {
    let metadata = sample_metadata();
    let frame = PromptFrame::new(DEFAULT_PROMPT_TEMPLATE, &metadata);

    let prefix = frame.prefix();

    assert!(prefix.contains("Abstract:\nWe track microbial communities over time."));
    assert!(!prefix.contains("Full Text:"));
}

#[test]
fn given_part_summaries_when_combining_then_labels_each_part() {
    let parts = vec![(1, "First.".to_string()), (3, "Third.".to_string())];
    let combined = combine_part_summaries(&parts, 3);
    assert_eq!(combined, "## Part 1 of 3\n\nFirst.\n\n## Part 3 of 3\n\nThird.");
}

#[test]
fn given_custom_template_when_consolidating_then_restates_template_structure() {
    let metadata = sample_metadata();
    let prompt = consolidation_prompt(&metadata, "parts", Some("## Findings for {title}\n{paper_text}"));

    assert!(prompt.contains("follows the structure of the template"));
    assert!(prompt.contains("## Findings for Gut Microbiome Dynamics"));
    assert!(prompt.ends_with("Part Summaries:\nparts"));
}

#[test]
fn given_default_template_when_consolidating_then_requests_generic_merge() {
    let prompt = consolidation_prompt(&sample_metadata(), "parts", None);
    assert!(prompt.contains("Combine these summaries into a single coherent summary"));
    assert!(!prompt.contains("Template:"));
}

#[test]
fn given_body_when_formatting_then_prepends_metadata_header() {
    let formatted = format_summary(&sample_metadata(), "Body text.");

    assert!(formatted.starts_with("# Gut Microbiome Dynamics\n\n**Authors:** Ada Lovelace, Alan Turing"));
    assert!(formatted.contains("**Publication Date:** 2024-03-01"));
    assert!(formatted.contains("**DOI:** 10.1101/2024.03.01.123456"));
    assert!(formatted.ends_with("---\n\nBody text."));
}

#[test]
fn given_abstract_summary_when_building_fallback_then_includes_banner_and_summary() {
    let body = fallback_body(Some("Short take."));
    assert!(body.contains(FALLBACK_BANNER));
    assert!(body.contains("## Abstract Summary\n\nShort take."));

    let bare = fallback_body(None);
    assert!(bare.contains(FALLBACK_BANNER));
    assert!(!bare.contains("## Abstract Summary"));
}
