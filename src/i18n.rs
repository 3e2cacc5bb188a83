/*!
 * Operator-facing messages in English and Vietnamese
 *
 * Only console output is localized; reports are always written the same
 * way so that runs stay comparable.
 */

use clap::ValueEnum;
use strum::Display;

/// Message language
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, Default)]
#[strum(serialize_all = "lowercase")]
pub enum Lang {
    /// English
    #[default]
    En,
    /// Vietnamese
    Vi,
}

impl Lang {
    pub fn app_title(&self) -> &'static str {
        "🔍 DOTDUMP"
    }

    pub fn analyzing(&self, path: &str) -> String {
        match self {
            Lang::En => format!("🔍 Analyzing project at: {}", path),
            Lang::Vi => format!("🔍 Đang phân tích dự án tại: {}", path),
        }
    }

    pub fn scanning(&self) -> &'static str {
        match self {
            Lang::En => "🔍 Scanning directories...",
            Lang::Vi => "🔍 Đang quét thư mục...",
        }
    }

    pub fn writing(&self) -> &'static str {
        match self {
            Lang::En => "📄 Processing hidden files...",
            Lang::Vi => "📄 Đang xử lý các tệp ẩn...",
        }
    }

    pub fn current_entry(&self, path: &str) -> String {
        match self {
            Lang::En => format!("Current entry: {}", path),
            Lang::Vi => format!("Đang xét: {}", path),
        }
    }

    pub fn root_warning(&self) -> &'static str {
        match self {
            Lang::En => "⚠️  Warning: you are about to scan the entire root filesystem. This may take a very long time and consume significant resources.",
            Lang::Vi => "⚠️  Cảnh báo: bạn sắp quét toàn bộ hệ thống tệp gốc. Việc này có thể mất rất nhiều thời gian và tài nguyên.",
        }
    }

    pub fn confirm(&self) -> &'static str {
        match self {
            Lang::En => "Continue? (y/N): ",
            Lang::Vi => "Tiếp tục? (y/N): ",
        }
    }

    pub fn cancelled(&self) -> &'static str {
        match self {
            Lang::En => "❌ Scan cancelled by user.",
            Lang::Vi => "❌ Người dùng đã hủy quét.",
        }
    }

    pub fn not_found(&self, path: &str) -> String {
        match self {
            Lang::En => format!("❌ Error: folder '{}' not found!", path),
            Lang::Vi => format!("❌ Lỗi: thư mục '{}' không tồn tại!", path),
        }
    }

    pub fn error(&self, detail: &str) -> String {
        match self {
            Lang::En => format!("💥 An error occurred: {}", detail),
            Lang::Vi => format!("💥 Có lỗi xảy ra: {}", detail),
        }
    }

    pub fn success(&self, path: &str) -> String {
        match self {
            Lang::En => format!("✅ Success! File created: {}", path),
            Lang::Vi => format!("✅ Thành công! Đã tạo file: {}", path),
        }
    }

    pub fn dry_run(&self) -> &'static str {
        match self {
            Lang::En => "🔍 DRY RUN - contents were not read",
            Lang::Vi => "🔍 CHẠY THỬ - nội dung tệp không được đọc",
        }
    }

    pub fn summary_title(&self) -> &'static str {
        match self {
            Lang::En => "📊  SUMMARY",
            Lang::Vi => "📊  THỐNG KÊ",
        }
    }

    pub fn files_title(&self) -> &'static str {
        match self {
            Lang::En => "📋  LARGEST INCLUDED FILES",
            Lang::Vi => "📋  CÁC TỆP LỚN NHẤT",
        }
    }

    /// Row labels of the summary table, in display order
    pub fn summary_labels(&self) -> SummaryLabels {
        match self {
            Lang::En => SummaryLabels {
                output_file: "📂 Output File",
                duration: "⏱️ Process Time",
                included: "📄 Files Included",
                skipped: "🚫 Files Skipped",
                excluded: "🙈 Files Excluded",
                pruned: "✂️ Directories Pruned",
                lines: "📝 Total Lines",
                chars: "🔤 Total Characters",
                walk_errors: "⚠️ Walk Errors",
                size: "📦 Total Size",
            },
            Lang::Vi => SummaryLabels {
                output_file: "📂 File đầu ra",
                duration: "⏱️ Thời gian",
                included: "📄 Số file đã xử lý",
                skipped: "🚫 Số file bỏ qua",
                excluded: "🙈 Số file bị loại",
                pruned: "✂️ Thư mục bị cắt",
                lines: "📝 Tổng số dòng",
                chars: "🔤 Tổng số ký tự",
                walk_errors: "⚠️ Lỗi khi duyệt",
                size: "📦 Tổng kích thước",
            },
        }
    }

    /// Skip reason breakdown, e.g. `2 binary, 1 too large`
    pub fn skipped_breakdown(&self, binary: usize, too_large: usize, unreadable: usize) -> String {
        match self {
            Lang::En => format!(
                "{} binary, {} too large, {} unreadable",
                binary, too_large, unreadable
            ),
            Lang::Vi => format!(
                "{} nhị phân, {} quá lớn, {} không đọc được",
                binary, too_large, unreadable
            ),
        }
    }
}

/// Localized row labels for the console summary
#[derive(Debug, Clone, Copy)]
pub struct SummaryLabels {
    pub output_file: &'static str,
    pub duration: &'static str,
    pub included: &'static str,
    pub skipped: &'static str,
    pub excluded: &'static str,
    pub pruned: &'static str,
    pub lines: &'static str,
    pub chars: &'static str,
    pub walk_errors: &'static str,
    pub size: &'static str,
}
