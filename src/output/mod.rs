pub mod formatter;

pub use formatter::{
    format_questions, format_report, format_report_detail, format_score, should_use_colors,
};
