//! HTML fragments for cards and the detail view.
//!
//! Every value that originates in a record goes through
//! [`escape_for_display`] before it is written out. Labels are static and
//! written as-is.

use std::fmt::Write;

use jcat_core::parse::escape_for_display;

use crate::card::{Card, Tag};
use crate::detail::Detail;
use crate::status::{page_line, Status};

/// Only absolute http(s) URLs become `href`s.
fn is_web_url(value: &str) -> bool {
    let lower = value.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn push_tags(out: &mut String, tags: &[Tag]) {
    if tags.is_empty() {
        return;
    }
    out.push_str("<div class=\"tags\">");
    for tag in tags {
        let class = if tag.alert { "tag tag-alert" } else { "tag" };
        let _ = write!(out, "<span class=\"{class}\">{}</span>", escape_for_display(&tag.label));
    }
    out.push_str("</div>");
}

fn push_cover(out: &mut String, cover: Option<&str>, alt: &str) {
    if let Some(src) = cover {
        let _ = write!(
            out,
            "<img class=\"cover\" src=\"{}\" alt=\"{}\">",
            escape_for_display(src),
            escape_for_display(alt)
        );
    }
}

/// One result card. `index` is the record's position in the page and is
/// carried as `data-index` for the detail lookup.
pub fn card(card: &Card, index: usize) -> String {
    let mut out = String::new();
    let _ = write!(out, "<article class=\"card\" data-index=\"{index}\">");
    push_cover(&mut out, card.cover.as_deref(), &card.title);
    let _ = write!(out, "<h3 class=\"card-title\">{}</h3>", escape_for_display(&card.title));
    push_tags(&mut out, &card.tags);
    out.push_str("<dl class=\"meta\">");
    for (label, value) in &card.meta {
        let _ = write!(out, "<dt>{label}</dt><dd>{}</dd>", escape_for_display(value));
    }
    out.push_str("</dl></article>");
    out
}

/// All cards of a page, concatenated.
pub fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| card(c, i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Status bar, result list (or the notice card) and pager.
pub fn page(status: &Status, page_cards: &[Card]) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<div class=\"status\"><span class=\"snapshot\">{}</span><span class=\"count\">{}</span></div>\n",
        escape_for_display(&status.snapshot_line()),
        status.count_line()
    );
    match status.empty_notice() {
        Some(notice) => {
            let _ = write!(out, "<div class=\"card\">{notice}</div>");
        }
        None => out.push_str(&cards(page_cards)),
    }
    if let Status::Ready { page, total_pages, .. } = status {
        let _ = write!(out, "\n<nav class=\"pagination\">{}</nav>", page_line(*page, *total_pages));
    }
    out
}

pub fn detail(detail: &Detail) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"detail\"><header>");
    push_cover(&mut out, detail.cover.as_deref(), &detail.title);
    let _ = write!(out, "<h2>{}</h2>", escape_for_display(&detail.title));
    if let Some(subtitle) = &detail.subtitle {
        let _ = write!(out, "<p class=\"subtitle\">{}</p>", escape_for_display(subtitle));
    }
    push_tags(&mut out, &detail.tags);
    out.push_str("</header><div class=\"detail-grid\">");
    for row in &detail.rows {
        let class = if row.wide { "row row-wide" } else { "row" };
        let value = escape_for_display(&row.value);
        let _ = write!(out, "<div class=\"{class}\"><span class=\"label\">{}</span>", row.label);
        if row.link && is_web_url(&row.value) {
            let _ = write!(
                out,
                "<a class=\"value\" href=\"{value}\" target=\"_blank\" rel=\"noopener noreferrer\">{value}</a>"
            );
        } else {
            let _ = write!(out, "<span class=\"value\">{value}</span>");
        }
        out.push_str("</div>");
    }
    out.push_str("</div></section>");
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
