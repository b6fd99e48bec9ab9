use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::{Chunk, DocumentMetadata};

pub const SYSTEM_PROMPT: &str = "You are a scientific research assistant tasked with summarizing scientific papers. Provide clear, concise, and accurate summaries that highlight the key findings, methods, strengths, limitations, and implications of the research.";

pub const CONSOLIDATION_SYSTEM_PROMPT: &str = "You are a scientific research assistant tasked with creating a coherent summary from multiple partial summaries of a scientific paper.";

pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"# Expert Analysis: {title}

You are a senior scientific researcher with decades of experience as a principal investigator, journal editor, and study section reviewer. Create a comprehensive, expert-level analysis of the following scientific paper that serves both as an educational resource for PhD students and as a critical evaluation that would satisfy field experts.

## 1. Paper Context and Significance
- **Research Domain:** [Identify the precise subfield classification]
- **Scientific Question:** [Identify the specific scientific gap or question being addressed]
- **Background Context:** [Provide brief historical context of this research question]
- **Key Technologies/Methods:** [Describe core methodological approaches with technical specificity]

## 2. Accessible Summary for Early-Career Researchers
[Provide a 3-4 paragraph explanation of the core research, written for a first-year PhD student. Balance accessibility with scientific precision. Define specialized terminology when first used. Highlight what makes this work novel or important in the broader context of the field.]

## 3. Key Findings and Contributions
- **Primary Findings:** [List the most important results with quantitative details where relevant]
- **Methodological Innovations:** [Describe any novel methods or techniques introduced]
- **Conceptual Advances:** [Explain theoretical or conceptual contributions]
- **Resource Generation:** [Note any datasets, tools, or resources produced]

## 4. Critical Analysis
- **Strengths:** [Identify the major strengths of the paper]
- **Limitations:** [Discuss methodological limitations, interpretative issues, or gaps]
- **Alternative Interpretations:** [Consider alternative explanations for the findings]
- **Unanswered Questions:** [Identify important questions left unaddressed]

## 5. Impact and Future Directions
- **Field Impact:** [Assess how this work advances the field]
- **Broader Implications:** [Consider implications beyond the immediate research area]
- **Follow-up Studies:** [Suggest logical next steps for this research]
- **Technical Improvements:** [Recommend methodological refinements]

Format your analysis in Markdown with clear headings and bullet points where appropriate."#;

pub const FALLBACK_BANNER: &str = "> **Note:** This is an abbreviated summary built from the paper's metadata only. The full text could not be summarized.";

pub const PREPRINT_METRIC: &str = "N/A (Preprint)";

const PAPER_TEXT_KEY: &str = "paper_text";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// Fills `{placeholder}` slots in `template` in a single pass.
///
/// Any brace-delimited name counts as a placeholder. Names are trimmed and
/// match case-insensitively, so `{TITLE}` and `{ title }` resolve to the
/// same field. Values in `extra` take precedence over metadata fields. Unknown
/// names are replaced with a visible `{placeholder 'name' not available}`
/// marker. Substituted values are never rescanned, so braces inside a value
/// are left alone.
pub fn build_prompt(
    template: &str,
    metadata: &DocumentMetadata,
    extra: &HashMap<String, String>,
) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = caps[1].trim();
            let key = name.to_lowercase();
            extra
                .iter()
                .find(|(k, _)| k.to_lowercase() == key)
                .map(|(_, v)| Cow::Borrowed(v.as_str()))
                .or_else(|| metadata_field(metadata, &key))
                .map(Cow::into_owned)
                .unwrap_or_else(|| format!("{{placeholder '{}' not available}}", name))
        })
        .into_owned()
}

fn metadata_field<'a>(metadata: &'a DocumentMetadata, key: &str) -> Option<Cow<'a, str>> {
    let value = match key {
        "title" => Cow::Borrowed(metadata.title.as_str()),
        "authors" => Cow::Owned(metadata.authors_display()),
        "abstract" => Cow::Borrowed(metadata.abstract_text.as_str()),
        "date" => Cow::Borrowed(metadata.publication_date.as_str()),
        "doi" | "identifier" => Cow::Borrowed(metadata.identifier.as_str()),
        "journal" => Cow::Borrowed(metadata.venue.as_str()),
        "url" => Cow::Owned(
            metadata
                .url()
                .unwrap_or_else(|| metadata.identifier.clone()),
        ),
        "category" => Cow::Borrowed(metadata.category.as_str()),
        "version" => Cow::Borrowed(metadata.version.as_str()),
        "license" => Cow::Borrowed(metadata.license.as_str()),
        "impact_factor" | "citation_count" => Cow::Borrowed(PREPRINT_METRIC),
        _ => return None,
    };
    Some(value)
}

pub fn template_embeds_paper_text(template: &str) -> bool {
    PLACEHOLDER
        .captures_iter(template)
        .any(|caps| caps[1].trim().eq_ignore_ascii_case(PAPER_TEXT_KEY))
}

/// Renders the user prompts of one summarization run from a template and
/// the paper's metadata.
#[derive(Debug, Clone)]
pub struct PromptFrame<'a> {
    template: &'a str,
    metadata: &'a DocumentMetadata,
    embeds_body: bool,
}

impl<'a> PromptFrame<'a> {
    pub fn new(template: &'a str, metadata: &'a DocumentMetadata) -> Self {
        Self {
            template,
            metadata,
            embeds_body: template_embeds_paper_text(template),
        }
    }

    /// The user prompt without any document body, used for budgeting.
    pub fn prefix(&self) -> String {
        self.with_metadata_block(&self.instructions(""))
    }

    pub fn single_pass(&self, body: &str) -> String {
        self.render(body, None)
    }

    pub fn for_chunk(&self, chunk: &Chunk) -> String {
        self.render(&chunk.text, Some((chunk.ordinal(), chunk.total_count)))
    }

    fn instructions(&self, body: &str) -> String {
        let mut extra = HashMap::new();
        if self.embeds_body {
            extra.insert(PAPER_TEXT_KEY.to_string(), body.to_string());
        }
        build_prompt(self.template, self.metadata, &extra)
    }

    fn with_metadata_block(&self, instructions: &str) -> String {
        let m = self.metadata;
        format!(
            "{}\n\nPaper Metadata:\nTitle: {}\nAuthors: {}\nDate: {}\nDOI: {}\n\nAbstract:\n{}",
            instructions,
            m.title,
            m.authors_display(),
            m.publication_date,
            m.identifier,
            m.abstract_text
        )
    }

    fn render(&self, body: &str, part: Option<(usize, usize)>) -> String {
        let mut prompt = self.with_metadata_block(&self.instructions(body));
        if let Some((ordinal, total)) = part {
            prompt.push_str(&format!(
                "\n\nNote: This is part {} of {} of the paper.",
                ordinal, total
            ));
        }
        if !self.embeds_body {
            prompt.push_str("\n\nFull Text:\n");
            prompt.push_str(body);
        }
        prompt
    }
}

/// Joins per-chunk summaries under `## Part i of n` headings.
pub fn combine_part_summaries(parts: &[(usize, String)], total: usize) -> String {
    parts
        .iter()
        .map(|(ordinal, summary)| format!("## Part {} of {}\n\n{}", ordinal, total, summary.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prompt for the final merge call. A custom template's structure is
/// restated so the merged summary follows it; otherwise a generic merge is
/// requested.
pub fn consolidation_prompt(
    metadata: &DocumentMetadata,
    combined: &str,
    custom_template: Option<&str>,
) -> String {
    let instructions = match custom_template {
        Some(template) => {
            let mut extra = HashMap::new();
            extra.insert(PAPER_TEXT_KEY.to_string(), String::new());
            format!(
                "You are provided with multiple summaries of different parts of the same scientific paper.\n\
                 Combine these summaries into a single coherent summary that follows the structure of the template below.\n\
                 Keep every section of the template, remove redundancies and do not invent content absent from the part summaries.\n\n\
                 Template:\n{}",
                build_prompt(template, metadata, &extra)
            )
        }
        None => "You are provided with multiple summaries of different parts of the same scientific paper.\n\
                 Combine these summaries into a single coherent summary that covers all the key aspects of the paper.\n\
                 Remove any redundancies and ensure the final summary is well-structured."
            .to_string(),
    };

    format!(
        "{}\n\nPaper Title: {}\nAuthors: {}\nAbstract: {}\n\nPart Summaries:\n{}",
        instructions,
        metadata.title,
        metadata.authors_display(),
        metadata.abstract_text,
        combined
    )
}

pub fn abstract_prompt(metadata: &DocumentMetadata) -> String {
    format!(
        "Summarize the abstract below in one short paragraph for a scientific audience. \
         State the research question, the approach and the main result.\n\nTitle: {}\n\nAbstract:\n{}",
        metadata.title, metadata.abstract_text
    )
}

/// Prepends the metadata header block to a summary body.
pub fn format_summary(metadata: &DocumentMetadata, body: &str) -> String {
    format!(
        "# {}\n\n**Authors:** {}\n\n**Publication Date:** {}\n\n**DOI:** {}\n\n**Abstract:** {}\n\n---\n\n{}",
        metadata.title,
        metadata.authors_display(),
        metadata.publication_date,
        metadata.identifier,
        metadata.abstract_text,
        body.trim()
    )
}

/// Body used when no part of the full text could be summarized.
pub fn fallback_body(abstract_summary: Option<&str>) -> String {
    let mut body = format!("## Summary of Available Information\n\n{}\n\n", FALLBACK_BANNER);
    if let Some(summary) = abstract_summary {
        body.push_str(&format!("## Abstract Summary\n\n{}\n\n", summary.trim()));
    }
    body.push_str(
        "## Processing Note\n\nThe full text could not be processed due to technical limitations. \
         This summary contains only the metadata that was available.\n",
    );
    body
}
