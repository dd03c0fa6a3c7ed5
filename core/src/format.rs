// pesan/src/format.rs

//! Indonesian display formats used across pages.

use chrono::{Datelike, NaiveDate};

const MONTHS_ID: [&str; 12] = [
  "Januari",
  "Februari",
  "Maret",
  "April",
  "Mei",
  "Juni",
  "Juli",
  "Agustus",
  "September",
  "Oktober",
  "November",
  "Desember",
];

/// Groups digits by thousands with `.` as id-ID does: `1234567` -> `1.234.567`.
pub fn group_thousands(value: u64) -> String {
  let digits = value.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push('.');
    }
    out.push(ch);
  }
  out
}

/// `IDR 100.000`
pub fn format_idr(amount: u64) -> String {
  format!("IDR {}", group_thousands(amount))
}

/// `20 Oktober 2026`
pub fn format_date_id(date: NaiveDate) -> String {
  format!("{} {} {}", date.day(), MONTHS_ID[date.month0() as usize], date.year())
}
