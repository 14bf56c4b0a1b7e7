// ==========================================
// 血库记录管理控制台 - 时间计算
// ==========================================
// 职责: 日期/时间规整 + 天数差计算
// 约定: 使用本地挂钟时间 (NaiveDateTime),不附带时区
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// 一天的毫秒数
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// 从 reference 到 target 的整天数
///
/// 毫秒差除以一天后向下取整;负数表示 target 已经过去
pub fn days_until(target: NaiveDateTime, reference: NaiveDateTime) -> i64 {
    let diff_ms = (target - reference).num_milliseconds();
    diff_ms.div_euclid(MILLIS_PER_DAY)
}

/// 日期当天零点
pub fn date_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 解析 "HH:MM" 时刻
///
/// 只接受两段冒号分隔的纯数字,小时 [0,23],分钟 [0,59]
pub fn parse_time_of_day(time: &str) -> EngineResult<NaiveTime> {
    let invalid = || EngineError::InvalidTimeFormat(time.to_string());

    let mut parts = time.split(':');
    let (hour, minute) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), None) => (parse_field(h, 23), parse_field(m, 59)),
        _ => return Err(invalid()),
    };

    match (hour, minute) {
        (Some(h), Some(m)) => NaiveTime::from_hms_opt(h, m, 0).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

fn parse_field(field: &str, max: u32) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse::<u32>().ok().filter(|v| *v <= max)
}

/// 合成日期与时刻
///
/// 取 date 的日历日 + time 的时分,秒与毫秒清零
pub fn combine_date_and_time(date: NaiveDate, time: &str) -> EngineResult<NaiveDateTime> {
    let time_of_day = parse_time_of_day(time)?;
    Ok(date.and_time(time_of_day))
}
