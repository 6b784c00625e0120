use serde::Serialize;

use crate::logging::LogLevel;

pub const DEFAULT_SHAPE_COUNT: usize = 20;
pub const DEFAULT_TYPING_INTERVAL_MS: u32 = 120;
pub const DEFAULT_TYPING_START_DELAY_MS: u32 = 2_000;
pub const DEFAULT_REVEAL_STAGGER_MS: u32 = 200;
pub const DEFAULT_RIPPLE_DURATION_MS: u32 = 600;
pub const DEFAULT_SCROLL_THROTTLE_MS: u32 = 16;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SHAPE_COUNT_BOUNDS: (usize, usize) = (0, 200);
const TYPING_INTERVAL_MS_BOUNDS: (u32, u32) = (10, 2_000);
const TYPING_START_DELAY_MS_BOUNDS: (u32, u32) = (0, 20_000);
const REVEAL_STAGGER_MS_BOUNDS: (u32, u32) = (0, 5_000);
const RIPPLE_DURATION_MS_BOUNDS: (u32, u32) = (50, 5_000);
const SCROLL_THROTTLE_MS_BOUNDS: (u32, u32) = (1, 1_000);

/// Runtime knobs read from `data-*` attributes on `<body>`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteractionConfig {
    pub shape_count: usize,
    pub typing_interval_ms: u32,
    pub typing_start_delay_ms: u32,
    pub reveal_stagger_ms: u32,
    pub ripple_duration_ms: u32,
    pub scroll_throttle_ms: u32,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            shape_count: DEFAULT_SHAPE_COUNT,
            typing_interval_ms: DEFAULT_TYPING_INTERVAL_MS,
            typing_start_delay_ms: DEFAULT_TYPING_START_DELAY_MS,
            reveal_stagger_ms: DEFAULT_REVEAL_STAGGER_MS,
            ripple_duration_ms: DEFAULT_RIPPLE_DURATION_MS,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl InteractionConfig {
    /// Builds the config from an attribute lookup. `lookup` receives the full
    /// attribute name, e.g. `data-shape-count`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let shape_count = parse_usize_with_bounds(
            lookup("data-shape-count"),
            DEFAULT_SHAPE_COUNT,
            SHAPE_COUNT_BOUNDS,
        );
        let typing_interval_ms = parse_u32_with_bounds(
            lookup("data-typing-interval-ms"),
            DEFAULT_TYPING_INTERVAL_MS,
            TYPING_INTERVAL_MS_BOUNDS,
        );
        let typing_start_delay_ms = parse_u32_with_bounds(
            lookup("data-typing-start-delay-ms"),
            DEFAULT_TYPING_START_DELAY_MS,
            TYPING_START_DELAY_MS_BOUNDS,
        );
        let reveal_stagger_ms = parse_u32_with_bounds(
            lookup("data-reveal-stagger-ms"),
            DEFAULT_REVEAL_STAGGER_MS,
            REVEAL_STAGGER_MS_BOUNDS,
        );
        let ripple_duration_ms = parse_u32_with_bounds(
            lookup("data-ripple-duration-ms"),
            DEFAULT_RIPPLE_DURATION_MS,
            RIPPLE_DURATION_MS_BOUNDS,
        );
        let scroll_throttle_ms = parse_u32_with_bounds(
            lookup("data-scroll-throttle-ms"),
            DEFAULT_SCROLL_THROTTLE_MS,
            SCROLL_THROTTLE_MS_BOUNDS,
        );
        let log_level = parse_log_level(lookup("data-log-level"), DEFAULT_LOG_LEVEL);

        Self {
            shape_count,
            typing_interval_ms,
            typing_start_delay_ms,
            reveal_stagger_ms,
            ripple_duration_ms,
            scroll_throttle_ms,
            log_level,
        }
    }
}

fn parse_u32_with_bounds(value: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_usize_with_bounds(value: Option<String>, default: usize, bounds: (usize, usize)) -> usize {
    value
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(value: Option<String>, default: LogLevel) -> LogLevel {
    match value
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty())
        .as_deref()
    {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        _ => default,
    }
}
