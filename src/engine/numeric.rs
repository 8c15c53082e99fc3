// ==========================================
// Smart Vista 能源与OEE仪表盘 - 数值辅助
// ==========================================
// 舍入规则: round-half-away-from-zero (四舍五入, 负数对称)
// ==========================================

/// 按指定小数位数舍入 (half away from zero)
///
/// # 参数
/// - `value`: 待舍入值
/// - `digits`: 保留小数位数
pub(crate) fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    // f64::round 即为 half-away-from-zero 语义
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_two_places() {
        // 0.125 / 3.375 为二进制可精确表示的半值
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(3.375, 2), 3.38);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn test_round_half_away_from_zero_negative() {
        // 负数向远离零的方向舍入
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(-0.125, 2), -0.13);
    }

    #[test]
    fn test_round_one_place() {
        assert_eq!(round_to(80.2869, 1), 80.3);
        assert_eq!(round_to(91.44, 1), 91.4);
    }
}
