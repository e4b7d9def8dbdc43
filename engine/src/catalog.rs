// Tool catalog shown by the navigation shell, with fuzzy search
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub route: &'static str,
}

pub static TOOLS: [ToolDefinition; 4] = [
    ToolDefinition {
        id: "countdown-timer",
        name: "Count Down Timer",
        description: "Create and manage multiple countdown timers for events, deadlines, and special occasions.",
        route: "/countdown-timer",
    },
    ToolDefinition {
        id: "percentage-calculator",
        name: "Percentage Calculator",
        description: "Calculate percentages, percentage increases, decreases, and find what percent one number is of another.",
        route: "/percentage-calculator",
    },
    ToolDefinition {
        id: "json-viewer",
        name: "JSON Viewer / parser",
        description: "View, format, validate and parse JSON data with syntax highlighting and error detection.",
        route: "/json-viewer",
    },
    ToolDefinition {
        id: "url-decoder",
        name: "URL Encoder / Decoder",
        description: "Encode and decode URLs, convert special characters and handle URL-safe formatting.",
        route: "/url-decoder",
    },
];

pub fn find(id: &str) -> Option<&'static ToolDefinition> {
    TOOLS.iter().find(|tool| tool.id == id)
}

/// Tools matching `query`, best match first. The name counts double so a
/// hit on the title beats one buried in the description.
pub fn search(query: &str) -> Vec<&'static ToolDefinition> {
    let query = query.trim();
    if query.is_empty() {
        return TOOLS.iter().collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &'static ToolDefinition)> = TOOLS
        .iter()
        .filter_map(|tool| {
            let by_name = matcher.fuzzy_match(tool.name, query).map(|s| s * 2);
            let by_id = matcher.fuzzy_match(tool.id, query).map(|s| s * 2);
            let by_description = matcher.fuzzy_match(tool.description, query);
            [by_name, by_id, by_description]
                .into_iter()
                .flatten()
                .max()
                .map(|score| (score, tool))
        })
        .collect();

    // Stable sort keeps catalog order for equal scores.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, tool)| tool).collect()
}
