/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use env_logger::Env;
use std::env;
use std::io::Write;

/// 日志颜色配置
struct LogColors {
    error: &'static str,
    warn: &'static str,
    info: &'static str,
    debug: &'static str,
    trace: &'static str,
    reset: &'static str,
}

impl LogColors {
    fn new(enable_color: bool) -> Self {
        if enable_color {
            Self {
                error: "\x1b[31m", // 红色
                warn: "\x1b[33m",  // 黄色
                info: "\x1b[32m",  // 绿色
                debug: "\x1b[36m", // 青色
                trace: "\x1b[35m", // 紫色
                reset: "\x1b[0m",
            }
        } else {
            Self {
                error: "",
                warn: "",
                info: "",
                debug: "",
                trace: "",
                reset: "",
            }
        }
    }
}

/// 设置日志系统
///
/// # 参数
/// - `verbose`: 详细级别 (0-3)
///   - 0: 只显示 ERROR, WARN
///   - 1: + INFO, debug1 (-v)
///   - 2: + debug2 (-vv)
///   - 3: + debug3 (-vvv)
pub fn setup_logger(verbose: u8) {
    let enable_color =
        env::var("NO_COLOR").is_err() && env::var("TERM").map_or(false, |term| term != "dumb");

    let mut log_config = vec!["error".to_string(), "warn".to_string()];
    if verbose > 0 {
        log_config.push("info".to_string());
    }
    for level in 1..=verbose.min(3) {
        log_config.push(format!("debug{}=debug", level));
    }

    // 只在未设置RUST_LOG时设置环境变量
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", log_config.join(","));
    }

    let colors = LogColors::new(enable_color);

    env_logger::Builder::from_env(Env::default().filter("RUST_LOG"))
        .format(move |buf, record| {
            let level_color = match record.level() {
                log::Level::Error => colors.error,
                log::Level::Warn => colors.warn,
                log::Level::Info => colors.info,
                log::Level::Debug => colors.debug,
                log::Level::Trace => colors.trace,
            };

            match record.target() {
                // ipmitool风格: 调试输出无前缀
                "debug1" | "debug2" | "debug3" => writeln!(buf, "{}", record.args()),
                _ => {
                    let level_text = match record.level() {
                        log::Level::Error => "ERROR",
                        log::Level::Warn => "WARN ",
                        log::Level::Info => "INFO ",
                        log::Level::Debug => "DEBUG",
                        log::Level::Trace => "TRACE",
                    };
                    writeln!(
                        buf,
                        "{}[{}]{} {}",
                        level_color,
                        level_text,
                        colors.reset,
                        record.args()
                    )
                }
            }
        })
        .try_init()
        .ok();
}

/// 辅助函数：检查指定调试级别是否启用
pub fn is_debug_enabled(level: u8) -> bool {
    match level {
        1 => log::log_enabled!(target: "debug1", log::Level::Debug),
        2 => log::log_enabled!(target: "debug2", log::Level::Debug),
        3 => log::log_enabled!(target: "debug3", log::Level::Debug),
        _ => false,
    }
}
