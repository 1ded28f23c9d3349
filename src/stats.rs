//! 통계 및 유틸리티 모듈
//!
//! 변환 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// 변환 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 읽은 데이터 행 수
    pub rows_read: AtomicUsize,
    /// 변환되어 출력된 행 수
    pub rows_converted: AtomicUsize,
    /// 형식 불일치로 건너뛴 행 수
    pub rows_skipped: AtomicUsize,
    /// 쓴 총 바이트
    pub total_bytes_written: AtomicU64,
    /// 변환 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 읽은 행 카운트 증가
    pub fn increment_read(&self) {
        self.rows_read.fetch_add(1, Ordering::Relaxed);
    }

    /// 변환된 행 카운트 증가
    pub fn increment_converted(&self) {
        self.rows_converted.fetch_add(1, Ordering::Relaxed);
    }

    /// 건너뛴 행 카운트 증가
    pub fn increment_skipped(&self) {
        self.rows_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// 쓴 바이트 추가
    pub fn add_bytes_written(&self, bytes: u64) {
        self.total_bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// 읽은 행 수 반환
    pub fn get_rows_read(&self) -> usize {
        self.rows_read.load(Ordering::Relaxed)
    }

    /// 변환된 행 수 반환
    pub fn get_rows_converted(&self) -> usize {
        self.rows_converted.load(Ordering::Relaxed)
    }

    /// 건너뛴 행 수 반환
    pub fn get_rows_skipped(&self) -> usize {
        self.rows_skipped.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 변환 통계 요약 출력
    pub fn print_summary(&self) {
        let read = self.get_rows_read();
        let converted = self.get_rows_converted();
        let skipped = self.get_rows_skipped();
        let bytes_written = self.total_bytes_written.load(Ordering::Relaxed);
        let elapsed = self.elapsed();

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 변환 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!("  {} 읽은 행:      {}", "📄".bright_cyan(), read);
        println!(
            "  {} 변환 성공:    {}",
            "✅".bright_green(),
            converted.to_string().green()
        );

        if skipped > 0 {
            println!(
                "  {} 건너뜀:       {}",
                "⚠️".bright_yellow(),
                skipped.to_string().yellow()
            );
        } else {
            println!("  {} 건너뜀:       {}", "✅".bright_green(), "0".green());
        }

        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(bytes_written)
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(elapsed)
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Arguments
/// * `bytes` - 바이트 수
///
/// # Returns
/// 형식화된 문자열 (예: "1.25 MB")
///
/// # Examples
/// ```
/// use cconvert::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}시간 {}분", hours, mins)
    } else if secs >= 60 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}분 {}초", mins, remaining_secs)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
