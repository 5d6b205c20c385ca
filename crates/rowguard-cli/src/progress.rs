use indicatif::{ProgressBar, ProgressStyle};
use rowguard_cli::job::JobProgress;

const BAR_TEMPLATE: &str = "{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} rows ({eta})";

/// Progress bar advanced at chunk boundaries. Inert when disabled.
pub struct ChunkProgress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl ChunkProgress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    pub fn update(&mut self, event: JobProgress) {
        if !self.enabled {
            return;
        }
        match event {
            JobProgress::Started { total_rows } => {
                let bar = ProgressBar::new(total_rows as u64);
                let style = ProgressStyle::with_template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> ");
                bar.set_style(style);
                self.bar = Some(bar);
            }
            JobProgress::Advanced { processed } => {
                if let Some(bar) = &self.bar {
                    bar.set_position(processed as u64);
                }
            }
        }
    }

    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
