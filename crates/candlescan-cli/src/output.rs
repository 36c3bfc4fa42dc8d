//! 스캔 결과 출력 기능.

use anyhow::{Context, Result};
use candlescan_core::{Price, ScanResult, SymbolPrice};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use std::io::Write;
use tracing::info;

/// 현재가를 기준 종가 근접으로 표시하는 하한 비율.
///
/// 검증기의 종가 하한(0.8)과는 목적이 다른 별도의 표시용 상수.
pub const NEAR_CLOSE_RATIO: Decimal = dec!(0.95);

/// 현재가가 기준 종가 근접 구간 `[0.95 × 종가, 종가)`에 있는지 확인.
pub fn is_near_reference_close(current_price: Price, reference_close: Price) -> bool {
    current_price >= NEAR_CLOSE_RATIO * reference_close && current_price < reference_close
}

/// 출력 형식.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: table, json", s)),
        }
    }
}

/// 스캔 결과 출력.
pub fn render_scan_results(
    results: &[ScanResult],
    format: OutputFormat,
    output_path: Option<&str>,
) -> Result<()> {
    let content = match format {
        OutputFormat::Table => format_scan_table(results),
        OutputFormat::Json => format_scan_json(results)?,
    };

    write_output(&content, output_path)
}

/// 후보 페어 목록 출력.
pub fn render_pairs(pairs: &[SymbolPrice], limit: usize) -> String {
    let shown: &[SymbolPrice] = if limit > 0 && pairs.len() > limit {
        &pairs[..limit]
    } else {
        pairs
    };

    let mut output = String::new();

    output.push_str(&format!("{:<14} {:>18}\n", "PAIR", "PRICE"));
    output.push_str(&"-".repeat(33));
    output.push('\n');

    for pair in shown {
        output.push_str(&format!("{:<14} {:>18}\n", pair.symbol, pair.price));
    }

    output.push('\n');
    if shown.len() < pairs.len() {
        output.push_str(&format!("Total: {} pairs (showing {})", pairs.len(), shown.len()));
    } else {
        output.push_str(&format!("Total: {} pairs", pairs.len()));
    }

    output
}

/// 테이블 형식 출력.
fn format_scan_table(results: &[ScanResult]) -> String {
    let mut output = String::new();

    // 헤더
    output.push_str(&format!(
        "{:<14} {:>14} {:>14} {:>14} {:>14} {:>16} {:<6}\n",
        "PAIR", "REF LOW", "REF HIGH", "REF OPEN", "REF CLOSE", "CURRENT", "NEAR"
    ));
    output.push_str(&"-".repeat(98));
    output.push('\n');

    // 데이터
    for result in results {
        let near = if is_near_reference_close(result.current_price, result.reference.close) {
            "✓"
        } else {
            "-"
        };

        output.push_str(&format!(
            "{:<14} {:>14} {:>14} {:>14} {:>14} {:>16} {:<6}\n",
            result.symbol,
            result.reference.low,
            result.reference.high,
            result.reference.open,
            result.reference.close,
            result.current_price,
            near
        ));
    }

    // 요약
    output.push('\n');
    output.push_str(&format!("{} pairs", results.len()));

    output
}

/// JSON 형식 출력.
fn format_scan_json(results: &[ScanResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize to JSON")
}

/// 파일 또는 stdout에 출력.
fn write_output(content: &str, output_path: Option<&str>) -> Result<()> {
    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path);
    } else {
        println!("{}", content);
    }

    Ok(())
}
