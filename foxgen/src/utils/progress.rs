use foxio::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};

const ZERO_CHUNK: usize = 1024 * 1024;

/// Zeroes `total` bytes from offset 0 with a progress bar.
pub fn zero_with_progress<IO: FoxIO + ?Sized>(
    io: &mut IO,
    total: u64,
    message: &str,
) -> anyhow::Result<()> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.white}] {bytes}/{total_bytes} {msg}")?
            .progress_chars("█░░"),
    );
    pb.set_message(message.to_string());

    let mut offset = 0u64;
    while offset < total {
        let len = (total - offset).min(ZERO_CHUNK as u64);
        io.zero_fill(offset, len as usize)?;
        offset += len;
        pb.inc(len);
    }

    pb.finish_and_clear();
    Ok(())
}
