//! Plain-text rendering for terminals.
//!
//! Values are printed as they are; control characters are replaced so a
//! hostile record cannot move the cursor or recolour the terminal.

use std::fmt::Write;

use crate::card::{Card, Tag};
use crate::detail::Detail;
use crate::status::{page_line, Status};

fn clean(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn tag_line(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| if t.alert { format!("[!{}]", clean(&t.label)) } else { format!("[{}]", clean(&t.label)) })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<n>. <title>  [tags]` followed by indented meta lines.
pub fn card(card: &Card, number: usize) -> String {
    let mut out = format!("{number:>3}. {}", clean(&card.title));
    if !card.tags.is_empty() {
        let _ = write!(out, "  {}", tag_line(&card.tags));
    }
    let meta = card
        .meta
        .iter()
        .map(|(label, value)| format!("{label}: {}", clean(value)))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = write!(out, "\n     {meta}");
    out
}

/// Status header, numbered cards (or the empty notice), then the pager.
/// `first_number` is the 1-based position of the first card in the result.
pub fn page(status: &Status, cards: &[Card], first_number: usize) -> String {
    let mut lines = Vec::new();
    let snapshot = status.snapshot_line();
    if !snapshot.is_empty() {
        lines.push(snapshot);
    }
    lines.push(status.count_line());

    match status.empty_notice() {
        Some(notice) => lines.push(notice.to_string()),
        None => lines.extend(cards.iter().enumerate().map(|(i, c)| card(c, first_number + i))),
    }

    if let Status::Ready { page, total_pages, .. } = status {
        lines.push(page_line(*page, *total_pages));
    }
    lines.join("\n")
}

pub fn detail(detail: &Detail) -> String {
    let mut lines = vec![clean(&detail.title)];
    if let Some(subtitle) = &detail.subtitle {
        lines.push(clean(subtitle));
    }
    if !detail.tags.is_empty() {
        lines.push(tag_line(&detail.tags));
    }
    if let Some(cover) = &detail.cover {
        lines.push(format!("封面: {}", clean(cover)));
    }
    let width = detail
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);
    for row in &detail.rows {
        let pad = width - row.label.chars().count();
        lines.push(format!("  {}{}  {}", row.label, " ".repeat(pad), clean(&row.value)));
    }
    lines.join("\n")
}
