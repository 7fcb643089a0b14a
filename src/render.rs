//! HTML rendering for the projects section.
//!
//! Every function here is pure: it takes typed data and returns markup. All
//! interpolated text goes through [`escape_html`].

use crate::models::{Panel, RepoStats, MAX_CARDS};
use crate::page::ProjectsPage;
use crate::types::GitHubRepo;
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub const NO_DESCRIPTION: &str = "No description available.";

/// Path the retry button posts to
pub const REFRESH_PATH: &str = "/refresh";

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `Oct 2026`, used on cards
pub fn format_month(date: &DateTime<Utc>) -> String {
    date.format("%b %Y").to_string()
}

/// `Oct 19, 2026`, used for the latest-update counter
pub fn format_day(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn render_card(repo: &GitHubRepo) -> String {
    let url = escape_html(&repo.html_url);
    let mut card = String::new();

    card.push_str("<div class=\"github-repo-card animate-on-scroll\">\n");
    card.push_str("  <div class=\"repo-header\">\n");
    let _ = writeln!(
        card,
        "    <h3><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></h3>",
        url,
        escape_html(&repo.name)
    );
    if let Some(language) = repo.language() {
        let _ = writeln!(card, "    <span class=\"repo-language\">{}</span>", escape_html(language));
    }
    card.push_str("  </div>\n");

    let _ = writeln!(
        card,
        "  <p class=\"repo-description\">{}</p>",
        escape_html(repo.description().unwrap_or(NO_DESCRIPTION))
    );

    card.push_str("  <div class=\"repo-stats\">\n");
    let _ = writeln!(
        card,
        "    <span class=\"repo-stat repo-stars\"><i class=\"fas fa-star\"></i> {}</span>",
        repo.stargazers_count
    );
    let _ = writeln!(
        card,
        "    <span class=\"repo-stat repo-forks\"><i class=\"fas fa-code-branch\"></i> {}</span>",
        repo.forks_count
    );
    let _ = writeln!(
        card,
        "    <span class=\"repo-stat repo-updated\"><i class=\"fas fa-calendar-alt\"></i> {}</span>",
        format_month(&repo.updated_at)
    );
    card.push_str("  </div>\n");

    card.push_str("  <div class=\"repo-footer\">\n");
    let _ = writeln!(
        card,
        "    <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"btn btn-outline btn-sm\"><i class=\"fab fa-github\"></i> View Code</a>",
        url
    );
    if let Some(homepage) = repo.homepage() {
        let _ = writeln!(
            card,
            "    <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"btn btn-primary btn-sm\"><i class=\"fas fa-external-link-alt\"></i> Live Demo</a>",
            escape_html(homepage)
        );
    }
    card.push_str("  </div>\n");
    card.push_str("</div>\n");

    card
}

/// Renders the first [`MAX_CARDS`] repositories in the order given.
pub fn render_cards(repos: &[GitHubRepo]) -> String {
    if repos.is_empty() {
        return render_empty();
    }

    repos.iter().take(MAX_CARDS).map(render_card).collect()
}

pub fn render_empty() -> String {
    concat!(
        "<div class=\"no-repos-message\">\n",
        "  <i class=\"fas fa-code-branch\"></i>\n",
        "  <h3>No GitHub Projects Available</h3>\n",
        "  <p>GitHub projects will appear here when you create public repositories.</p>\n",
        "  <a href=\"https://github.com/new\" target=\"_blank\" class=\"btn btn-primary\">Create Your First Repository</a>\n",
        "</div>\n",
    )
    .to_string()
}

pub fn render_error() -> String {
    format!(
        concat!(
            "<div class=\"error-message\">\n",
            "  <i class=\"fas fa-exclamation-triangle\"></i>\n",
            "  <h3>Unable to load GitHub projects</h3>\n",
            "  <p>Please check your internet connection or try again later.</p>\n",
            "  <form method=\"post\" action=\"{}\">\n",
            "    <button type=\"submit\" class=\"btn btn-outline retry-btn\"><i class=\"fas fa-redo\"></i> Retry</button>\n",
            "  </form>\n",
            "</div>\n",
        ),
        REFRESH_PATH
    )
}

pub fn render_panel(panel: &Panel) -> String {
    match panel {
        Panel::Cards(repos) => render_cards(repos),
        Panel::Empty => render_empty(),
        Panel::Error => render_error(),
    }
}

pub fn render_stats(stats: &RepoStats) -> String {
    let latest = stats.latest_update.as_ref().map(format_day).unwrap_or_default();

    format!(
        concat!(
            "<div class=\"github-stats\">\n",
            "  <div class=\"stat\"><span id=\"repo-count\">{}</span> Repositories</div>\n",
            "  <div class=\"stat\"><span id=\"language-count\">{}</span> Languages</div>\n",
            "  <div class=\"stat\"><span id=\"total-stars\">{}</span> Stars</div>\n",
            "  <div class=\"stat\"><span id=\"latest-update\">{}</span> Last Update</div>\n",
            "</div>\n",
        ),
        stats.repo_count,
        stats.language_count,
        stats.total_stars,
        escape_html(&latest)
    )
}

/// The projects section: counters, spinner and card container.
pub fn render_fragment(page: &ProjectsPage) -> String {
    let mut html = String::from("<section id=\"github-projects\">\n");

    if let Some(stats) = &page.stats {
        html.push_str(&render_stats(stats));
    }

    let spinner_display = if page.loading { "block" } else { "none" };
    let _ = writeln!(
        html,
        "<div id=\"github-spinner\" class=\"spinner\" style=\"display: {};\"></div>",
        spinner_display
    );

    html.push_str("<div id=\"github-repos\" class=\"github-repos\">\n");
    if let Some(panel) = &page.panel {
        html.push_str(&render_panel(panel));
    }
    html.push_str("</div>\n</section>\n");

    html
}

pub fn render_document(page: &ProjectsPage, username: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{} - GitHub Projects</title>\n",
            "</head>\n",
            "<body>\n",
            "{}",
            "</body>\n",
            "</html>\n",
        ),
        escape_html(username),
        render_fragment(page)
    )
}
