use coveswap_math::U256;

/// Parses a decimal literal too wide for a native integer.
pub fn u(s: &str) -> U256 {
    s.parse().unwrap()
}

/// sqrt(1/1) in Q64.96
pub fn price_1_1() -> U256 {
    coveswap_math::Q96
}

/// sqrt(121/100) in Q64.96
pub fn price_121_100() -> U256 {
    u("87150978765690771352898345369")
}

/// sqrt(101/100) in Q64.96
pub fn price_101_100() -> U256 {
    u("79623317895830914510639640423")
}

/// sqrt(1000/100) in Q64.96
pub fn price_1000_100() -> U256 {
    u("250541448375047931186413801569")
}
