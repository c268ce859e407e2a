//! Status strings shown around a result page.

use jcat_core::{SearchPage, StoreError};

pub const LOADING: &str = "加载中...";
pub const LOAD_FAILED: &str = "数据加载失败，请确认已生成本地数据文件。";
pub const SNAPSHOT_MISSING: &str = "数据快照不存在或无法读取，请先生成本地数据文件。";
pub const NO_RESULTS: &str = "暂无匹配结果，请调整筛选条件。";

/// What the status area says about the current search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready {
        total: usize,
        page: usize,
        total_pages: usize,
        generated_at: Option<String>,
    },
    Failed,
}

impl Status {
    pub fn from_result(result: &Result<SearchPage, StoreError>) -> Status {
        match result {
            Ok(page) => Status::Ready {
                total: page.total,
                page: page.page,
                total_pages: page.total_pages(),
                generated_at: page.generated_at.clone(),
            },
            Err(_) => Status::Failed,
        }
    }

    /// `数据快照：<generatedAt>`, or the loading/failure notice. Empty when
    /// the snapshot carries no timestamp.
    pub fn snapshot_line(&self) -> String {
        match self {
            Status::Loading => LOADING.to_string(),
            Status::Ready {
                generated_at: Some(at),
                ..
            } => format!("数据快照：{at}"),
            Status::Ready { .. } => String::new(),
            Status::Failed => LOAD_FAILED.to_string(),
        }
    }

    /// `共 N 条`; zero while loading or after a failure.
    pub fn count_line(&self) -> String {
        match self {
            Status::Ready { total, .. } => count_line(*total),
            Status::Loading | Status::Failed => count_line(0),
        }
    }

    /// Shown in place of the result list when there is nothing to list.
    pub fn empty_notice(&self) -> Option<&'static str> {
        match self {
            Status::Ready { total: 0, .. } => Some(NO_RESULTS),
            Status::Failed => Some(SNAPSHOT_MISSING),
            _ => None,
        }
    }
}

pub fn count_line(total: usize) -> String {
    format!("共 {total} 条")
}

pub fn page_line(page: usize, total_pages: usize) -> String {
    format!("第 {page} / {total_pages} 页")
}
