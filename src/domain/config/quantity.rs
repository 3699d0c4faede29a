// Copyright 2025 Charted Team.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Kubernetes resource quantity grammars
//!
//! Cpu quantities normalize to millicores, memory quantities to bytes, so
//! that request/limit comparisons are unit-independent.

use crate::shared::error::{ChartError, Result};

/// Parse a cpu quantity into millicores.
///
/// Accepts the millicore form ("100m", "1500m") and the decimal core form
/// ("1", "0.5", "1.25") with at most three fraction digits.
pub fn parse_cpu_millis(s: &str) -> Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ChartError::invalid_shape("cpu", "empty quantity"));
    }

    if let Some(millis) = s.strip_suffix('m') {
        return millis
            .parse::<u64>()
            .map_err(|_| ChartError::invalid_shape("cpu", format!("invalid quantity: {}", s)));
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if frac.len() > 3 {
        return Err(ChartError::invalid_shape(
            "cpu",
            format!("at most 3 fraction digits allowed: {}", s),
        ));
    }

    let whole: u64 = whole
        .parse()
        .map_err(|_| ChartError::invalid_shape("cpu", format!("invalid quantity: {}", s)))?;

    let frac_millis: u64 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<3}", frac);
        padded
            .parse()
            .map_err(|_| ChartError::invalid_shape("cpu", format!("invalid quantity: {}", s)))?
    };

    whole
        .checked_mul(1000)
        .and_then(|w| w.checked_add(frac_millis))
        .ok_or_else(|| ChartError::invalid_shape("cpu", format!("quantity out of range: {}", s)))
}

/// Parse a memory quantity into bytes.
///
/// Accepts binary suffixes (Ki, Mi, Gi, Ti), decimal suffixes (K, M, G, T)
/// and plain byte counts.
pub fn parse_memory_bytes(s: &str) -> Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ChartError::invalid_shape("memory", "empty quantity"));
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix("Ki") {
        (n, 1024u64)
    } else if let Some(n) = s.strip_suffix("Mi") {
        (n, 1024u64 * 1024)
    } else if let Some(n) = s.strip_suffix("Gi") {
        (n, 1024u64 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("Ti") {
        (n, 1024u64 * 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1000u64)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1000u64 * 1000)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1000u64 * 1000 * 1000)
    } else if let Some(n) = s.strip_suffix('T') {
        (n, 1000u64 * 1000 * 1000 * 1000)
    } else {
        (s, 1u64)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| ChartError::invalid_shape("memory", format!("invalid quantity: {}", s)))?;

    num.checked_mul(unit)
        .ok_or_else(|| ChartError::invalid_shape("memory", format!("quantity out of range: {}", s)))
}
