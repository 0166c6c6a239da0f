use crate::config::MatterEntry;
use crate::record::RecordProvider;
use crate::ui;
use crate::widget::{MatterView, MatterWidget};
use anyhow::Result;
use comfy_table::Cell;
use futures::future::join_all;
use indicatif::ProgressBar;
use tracing::debug;

#[derive(Debug)]
pub struct MatterSummary {
    pub name: String,
    pub view: MatterView,
}

impl MatterSummary {
    pub fn display_as_table(&self) -> String {
        let mut output = format!(
            "Matter: {}  {}\n\n",
            ui::style_text(&self.name, ui::StyleType::Title),
            ui::style_text(&self.view.record_id, ui::StyleType::Subtle)
        );

        if let Some(error) = &self.view.error {
            output.push_str(&ui::style_text(error, ui::StyleType::Error));
            return output;
        }

        let Some(figures) = &self.view.figures else {
            output.push_str(&ui::style_text("Loading...", ui::StyleType::Subtle));
            return output;
        };

        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Figure"), ui::header_cell("Amount")]);

        table.add_row(vec![
            Cell::new("Trust Balance"),
            ui::amount_cell(&figures.trust_balance.formatted),
        ]);
        table.add_row(vec![
            Cell::new("Retainer Amount"),
            ui::amount_cell(&figures.retainer_amount.formatted),
        ]);
        table.add_row(vec![
            Cell::new("Work in Progress"),
            ui::amount_cell(&figures.work_in_progress.formatted),
        ]);
        table.add_row(vec![
            Cell::new("Total Worked"),
            ui::amount_cell(&figures.total_worked.formatted),
        ]);
        table.add_row(vec![
            Cell::new("Total Billed"),
            ui::amount_cell(&figures.billed.formatted),
        ]);
        if figures.retainer_shortfall.amount > 0.0 {
            table.add_row(vec![
                Cell::new("Pay to Maintain Retainer"),
                ui::amount_cell(&figures.pay_to_maintain_retainer.formatted),
            ]);
        }
        table.add_row(vec![
            Cell::new(figures.indicator_label),
            ui::indicator_cell(&figures.indicator.formatted, figures.has_credit),
        ]);

        output.push_str(&table.to_string());
        output
    }
}

pub async fn generate_matter_summary(
    entry: &MatterEntry,
    provider: &(dyn RecordProvider + Send + Sync),
    currency_symbol: &str,
    pb: ProgressBar,
) -> MatterSummary {
    let mut widget = MatterWidget::new(entry.record_id.clone());
    widget.refresh(provider).await;
    pb.inc(1);

    debug!(
        "Generated summary for {} (failed: {})",
        entry.record_id,
        widget.error().is_some()
    );

    MatterSummary {
        name: entry
            .name
            .clone()
            .unwrap_or_else(|| entry.record_id.clone()),
        view: MatterView::from_widget(&widget, currency_symbol),
    }
}

/// Fetches every configured matter concurrently and prints one table per
/// matter. A failed fetch renders its error message and never aborts the run.
pub async fn generate_and_display_summaries(
    matters: &[MatterEntry],
    provider: &(dyn RecordProvider + Send + Sync),
    currency_symbol: &str,
) -> Result<()> {
    let pb = ui::new_progress_bar(matters.len() as u64, true);
    pb.set_message("Fetching matters...");

    let summary_futures = matters.iter().map(|entry| {
        let pb_clone = pb.clone();
        async move { generate_matter_summary(entry, provider, currency_symbol, pb_clone).await }
    });

    let summaries = join_all(summary_futures).await;
    pb.finish_and_clear();

    let num_summaries = summaries.len();
    for (i, summary) in summaries.into_iter().enumerate() {
        println!("{}", summary.display_as_table());
        if i < num_summaries - 1 {
            ui::print_separator();
        }
    }

    Ok(())
}
