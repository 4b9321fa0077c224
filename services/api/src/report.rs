use crate::infra::{parse_date, parse_kind};
use chrono::NaiveDate;
use clap::Args;
use facility_compliance::config::AppConfig;
use facility_compliance::deadlines::views::{ClassificationView, ObligationView, SummaryView};
use facility_compliance::deadlines::{
    classify_all, classify_with, summarize_by_owner, ComplianceSummary, ObligationKind,
};
use facility_compliance::error::AppError;
use facility_compliance::records::ObligationImporter;
use facility_compliance::{Clock, SystemClock};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Due date (YYYY-MM-DD or DD/MM/YYYY); omit for an undated obligation
    #[arg(long, value_parser = parse_date)]
    pub(crate) due: Option<NaiveDate>,
    /// Obligation kind: verification, prescription or commission
    #[arg(long, value_parser = parse_kind)]
    pub(crate) kind: ObligationKind,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// Obligation CSV export (kind,id,owner,label,reference_date,due_date,priority,criticality)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// List every obligation with its status
    #[arg(long)]
    pub(crate) list: bool,
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let ClassifyArgs { due, kind, today } = args;
    let config = AppConfig::load()?;
    let today = SystemClock.today_or(today);

    let classification = classify_with(&config.deadlines.policy(), today, due, kind)?;
    let view = ClassificationView::from(&classification);

    println!("{} (evaluated {})", kind.label(), today);
    match due {
        Some(due) => println!("Due date: {due}"),
        None => println!("Due date: not set"),
    }
    println!(
        "Status: {} [{}] - {}",
        view.tier_label,
        view.severity.label(),
        view.delay_label
    );

    Ok(())
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let SummaryArgs { csv, today, list } = args;
    let config = AppConfig::load()?;
    let policy = config.deadlines.policy();
    let today = SystemClock.today_or(today);

    let obligations = ObligationImporter::from_path(&csv)?;
    let owners = summarize_by_owner(&policy, today, &obligations)?;
    let overall = ComplianceSummary::rollup(owners.iter().map(|entry| &entry.summary));

    println!("Compliance summary for {} (evaluated {})", csv.display(), today);

    println!("\nEstablishments");
    for entry in &owners {
        render_summary(&SummaryView::from(entry));
    }

    println!("\nOverall");
    render_summary(&SummaryView::new(None, &overall));

    if list {
        let mut items: Vec<ObligationView> = classify_all(&policy, today, &obligations)?
            .iter()
            .map(ObligationView::from)
            .collect();
        items.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)));

        println!("\nObligations by due date");
        for item in items {
            let due = item
                .due_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "- {} | {} | {} | {} | due {} | {} ({})",
                item.owner,
                item.id,
                item.kind_label,
                item.label.as_deref().unwrap_or(""),
                due,
                item.status.tier_label,
                item.status.delay_label
            );
        }
    }

    Ok(())
}

fn render_summary(view: &SummaryView) {
    let name = view.owner.as_deref().unwrap_or("all establishments");
    let rate = view
        .compliance_rate
        .map(|rate| format!("{rate:.0}%"))
        .unwrap_or_else(|| "n/a".to_string());

    println!(
        "- {}: {} ({} obligations, {} overdue, {} due soon, {} compliant, {} upcoming, {} undated, rate {})",
        name,
        view.status,
        view.total_obligations,
        view.overdue_count,
        view.due_soon_count,
        view.compliant_count,
        view.future_count,
        view.not_applicable_count,
        rate
    );

    if let Some(earliest) = &view.earliest_overdue {
        let due = earliest
            .due_date
            .map(|date| date.to_string())
            .unwrap_or_default();
        println!("  most overdue: {} (due {})", earliest.id, due);
    }
}
