// pesan/app/src/terminal.rs

//! Terminal renditions of the page effects: a "navigation" prints the URL to
//! open, a notice is printed as a boxed message on stderr.

use pesan::{Navigator, Notice, Notifier};

#[derive(Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
  fn navigate(&self, url: &str) {
    tracing::info!(%url, "Navigating.");
    println!("Buka halaman pembayaran: {url}");
  }
}

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
  fn notify(&self, notice: Notice) {
    let width = notice.title.chars().count().max(notice.description.chars().count()) + 2;
    let rule = "-".repeat(width);
    eprintln!("+{rule}+");
    eprintln!("| {:<w$} |", notice.title, w = width - 2);
    eprintln!("| {:<w$} |", notice.description, w = width - 2);
    eprintln!("+{rule}+");
  }
}
