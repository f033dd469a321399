pub mod notify;

pub use notify::*;

/// 全部发送成功（包括没有评论）
pub const EXIT_SUCCESS: i32 = 0;
/// 配置、读取或解析失败，未发送任何消息
pub const EXIT_FATAL: i32 = 1;
/// 至少一条评论发送失败
pub const EXIT_PARTIAL_FAILURE: i32 = 2;

/// 将批次汇总映射为进程退出码
pub fn exit_code(summary: &crate::notification::DispatchSummary) -> i32 {
    if summary.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_PARTIAL_FAILURE
    }
}
