// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in monitor presets for known generation sites.

use clap::ValueEnum;

use crate::config::{MonitorConfig, UrlMatcherSpec, UrlPattern, DEFAULT_COMPLETION_STATUS};

/// Known target sites
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Site {
    /// freeaiimage.net image tasks
    #[value(name = "freeaiimage")]
    FreeAiImage,
    /// digen.ai image/video generation
    Digen,
    /// duckduckgo.com chat endpoints
    #[value(name = "duckduckgo")]
    DuckDuckGo,
    /// sora.chatgpt.com video generation
    Sora,
    /// Any URL, common id aliases, hex fallback
    Generic,
}

impl Site {
    pub fn all() -> &'static [Site] {
        &[
            Site::FreeAiImage,
            Site::Digen,
            Site::DuckDuckGo,
            Site::Sora,
            Site::Generic,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Site::FreeAiImage => "freeaiimage",
            Site::Digen => "digen",
            Site::DuckDuckGo => "duckduckgo",
            Site::Sora => "sora",
            Site::Generic => "generic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Site::FreeAiImage => "freeaiimage.net task polling (qwen_image and friends)",
            Site::Digen => "digen.ai image/video generation endpoints",
            Site::DuckDuckGo => "duckduckgo.com duckchat endpoints",
            Site::Sora => "sora.chatgpt.com video generation backend",
            Site::Generic => "any URL; task_id/taskId/taskid aliases with hex fallback",
        }
    }

    /// Monitor config for this site
    pub fn config(&self) -> MonitorConfig {
        let (matchers, aliases, hex_fallback): (Vec<UrlMatcherSpec>, &[&str], bool) = match self {
            // The id parameter was renamed between deployments, including a
            // misspelled `taskld`.
            Site::FreeAiImage => (
                vec![substring("/api/services/aigc/task")],
                &["taskId", "task_id", "taskid", "taskld"],
                true,
            ),
            Site::Digen => (
                vec![regex(r"(?i)/api/.*(task|generat|video|image)")],
                &["task_id", "taskId", "id"],
                true,
            ),
            Site::DuckDuckGo => (
                vec![substring("duckchat"), substring("/chat")],
                &["task_id", "id"],
                false,
            ),
            Site::Sora => (
                vec![regex(r"/backend/(video_gen|generations?|tasks?)")],
                &["task_id", "taskId", "generation_id"],
                false,
            ),
            Site::Generic => (
                vec![UrlMatcherSpec::Pattern(UrlPattern::Any)],
                &["task_id", "taskId", "taskid"],
                true,
            ),
        };

        let mut config = MonitorConfig::for_urls(Vec::<String>::new());
        config.name = self.name().to_string();
        config.task_url_matchers = matchers;
        config.task_id_param_names = aliases.iter().map(|s| s.to_string()).collect();
        config.completion_status = DEFAULT_COMPLETION_STATUS.to_string();
        config.hex_fallback = hex_fallback;
        config
    }
}

fn substring(text: &str) -> UrlMatcherSpec {
    UrlMatcherSpec::Substring(text.to_string())
}

fn regex(pattern: &str) -> UrlMatcherSpec {
    UrlMatcherSpec::Pattern(UrlPattern::Regex {
        pattern: pattern.to_string(),
    })
}

#[cfg(test)]
#[path = "site_tests.rs"]
mod tests;
