//! Progress rendering for downloads and extraction.

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

const BYTES_TEMPLATE: &str =
    "{spinner:.blue} {msg} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";
const COUNT_TEMPLATE: &str = "{spinner:.blue} {msg} [{wide_bar:.cyan/blue}] {pos}/{len}";
const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";
const BAR_CHARS: &str = "█▓▒░  ";

static BYTES_STYLE: Lazy<ProgressStyle> = Lazy::new(|| style_for(BYTES_TEMPLATE));
static COUNT_STYLE: Lazy<ProgressStyle> = Lazy::new(|| style_for(COUNT_TEMPLATE));

fn style_for(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .map(|s| s.tick_chars(TICK).progress_chars(BAR_CHARS))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Byte-denominated bar for downloads. Length is set once the server
/// declares a content length; without one the bar still ticks.
pub fn byte_bar(msg: &'static str) -> ProgressBar {
    let bar = ProgressBar::no_length();
    bar.set_style(BYTES_STYLE.clone());
    bar.set_message(msg);
    bar
}

/// Entry-count bar for extraction.
pub fn count_bar(msg: &'static str) -> ProgressBar {
    let bar = ProgressBar::no_length();
    bar.set_style(COUNT_STYLE.clone());
    bar.set_message(msg);
    bar
}
