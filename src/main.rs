//! cconvert - CSV TO JSON CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

use cconvert::{
    cli::Args,
    converter::{convert, ConvertOptions},
    error::CConvertError,
    stats::Statistics,
    writer::output_path,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 입력 파일 확인
    validate_input(&args)?;

    // 헤더 출력
    print_header(&args);

    let options = ConvertOptions::new()
        .with_separator(args.separator)
        .with_pretty(args.pretty)
        .with_verbose(args.verbose);

    let stats = Arc::new(Statistics::new());

    println!("\n{}", "🚀 변환 시작...".bright_cyan());

    let output = convert(&args.input, &options, &stats)?;

    // 통계 출력
    stats.print_summary();

    println!("\n{} 저장 완료: {:?}\n", "✅".bright_green(), output);

    Ok(())
}

/// 입력 경로 유효성 검사
fn validate_input(args: &Args) -> cconvert::Result<()> {
    if !args.input.exists() {
        return Err(CConvertError::InputNotFound {
            path: args.input.clone(),
        });
    }

    let is_csv = args
        .input
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if !is_csv {
        return Err(CConvertError::NotACsvFile {
            path: args.input.clone(),
        });
    }

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🔄 CSV TO JSON CONVERTER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 파일: {:?}", "📂".bright_cyan(), args.input);
    println!(
        "  {} 출력 파일: {:?}",
        "📄".bright_green(),
        output_path(&args.input, args.pretty)
    );
    println!("  {} 구분자: {}", "⚙️".bright_yellow(), args.separator);

    if args.pretty {
        println!(
            "  {} {}",
            "✨".bright_magenta(),
            "Pretty 출력 모드".magenta()
        );
    }

    if args.verbose {
        println!("  {} {}", "🔍".bright_cyan(), "상세 출력 모드".cyan());
    }

    println!("{}", "═".repeat(50).bright_blue());
}
