use leads_dashboard::domain::lead::{Lead, LeadField};
use leads_dashboard::domain::view::{SortDirection, ViewState};
use leads_dashboard::pipeline::{self, aggregate, filter, sort};

mod common;

use common::{lead, sample_leads};

fn ids(leads: &[&Lead]) -> Vec<String> {
    leads
        .iter()
        .map(|lead| lead.text(LeadField::LeadId))
        .collect()
}

#[test]
fn search_matches_name_case_insensitively() {
    let leads = sample_leads();
    let visible = filter::filter_leads(&leads, "jane", "");
    assert_eq!(ids(&visible), ["1"]);
}

#[test]
fn search_and_stage_filter_combine() {
    let leads = vec![
        lead(1, "Jane Doe", "New"),
        lead(2, "Janet", "Won"),
        lead(3, "Bob", "New"),
    ];
    assert_eq!(ids(&filter::filter_leads(&leads, "JAN", "New")), ["1"]);
    assert_eq!(ids(&filter::filter_leads(&leads, "", "New")), ["1", "3"]);
    assert_eq!(ids(&filter::filter_leads(&leads, "", "")), ["1", "2", "3"]);
    assert!(filter::filter_leads(&leads, "", "new").is_empty());
}

#[test]
fn search_matches_numeric_phone() {
    let leads = vec![lead(1, "Jane", "New").with(LeadField::Phone, 254700123456_i64)];
    assert_eq!(ids(&filter::filter_leads(&leads, "0012", "")), ["1"]);
}

#[test]
fn numeric_sort_coerces_garbage_to_zero() {
    let leads = vec![
        lead(1, "A", "New").with(LeadField::OrderValue, "100"),
        lead(2, "B", "New").with(LeadField::OrderValue, "abc"),
        lead(3, "C", "New").with(LeadField::OrderValue, "50"),
    ];
    let mut refs: Vec<&Lead> = leads.iter().collect();
    sort::sort_leads(&mut refs, LeadField::OrderValue, SortDirection::Asc);
    assert_eq!(ids(&refs), ["2", "3", "1"]);
}

#[test]
fn text_sort_ignores_case() {
    let leads = vec![lead(1, "Ann", "New"), lead(2, "bob", "New")];
    let mut refs: Vec<&Lead> = leads.iter().collect();
    sort::sort_leads(&mut refs, LeadField::ClientName, SortDirection::Desc);
    assert_eq!(ids(&refs), ["2", "1"]);
}

#[test]
fn pagination_slices_filtered_leads() {
    let leads: Vec<Lead> = (1..=25).map(|i| lead(i, &format!("Client {i:02}"), "New")).collect();
    let mut view = ViewState::new(10);
    view.sort_by(LeadField::ClientName);

    let first = pipeline::run(&leads, &view);
    assert_eq!(first.page.total_pages, 3);
    assert_eq!(first.page.items.len(), 10);
    assert_eq!(first.page.items[0].text(LeadField::ClientName), "Client 01");

    view.page = 3;
    let third = pipeline::run(&leads, &view);
    assert_eq!(third.page.items.len(), 5);
    assert_eq!(third.page.items[0].text(LeadField::ClientName), "Client 21");

    view.page = 4;
    assert!(pipeline::run(&leads, &view).page.items.is_empty());
}

#[test]
fn revenue_projection_example() {
    let leads = [
        Lead::default()
            .with(LeadField::LeadStage, "Offer Sent")
            .with(LeadField::QuotedPrice, "1000"),
        Lead::default()
            .with(LeadField::LeadStage, "Won")
            .with(LeadField::OrderValue, "2000")
            .with(LeadField::QuotedPrice, "500"),
        Lead::default().with(LeadField::LeadStage, "Lost"),
    ];
    let refs: Vec<&Lead> = leads.iter().collect();
    let metrics = aggregate::aggregate(&refs);
    assert_eq!(metrics.revenue_projection, 2500.0);
    assert_eq!(metrics.stage_count("Lost"), 1);
}

#[test]
fn metrics_cover_every_filtered_lead_not_just_the_page() {
    let leads: Vec<Lead> = (1..=15).map(|i| lead(i, "Client", "Lost")).collect();
    let view = ViewState::new(10);
    let output = pipeline::run(&leads, &view);
    assert_eq!(output.page.items.len(), 10);
    assert_eq!(output.metrics.total, 15);
    assert_eq!(output.metrics.stage_count("Lost"), 15);
}

#[test]
fn view_changes_reset_page_but_navigation_keeps_the_rest() {
    let mut view = ViewState::new(10);
    view.go_to_page(3, 5);
    view.set_search("x");
    assert_eq!(view.page, 1);

    view.go_to_page(2, 5);
    assert_eq!(view.search, "x");
    assert_eq!(view.page, 2);

    view.set_stage_filter("Won");
    assert_eq!(view.page, 1);

    view.go_to_page(4, 5);
    view.sort_by(LeadField::OrderValue);
    assert_eq!(view.page, 1);
    assert_eq!(view.stage_filter, "Won");
}

#[test]
fn running_twice_yields_identical_output() {
    let leads = sample_leads();
    let mut view = ViewState::default();
    view.set_search("o");
    assert_eq!(pipeline::run(&leads, &view), pipeline::run(&leads, &view));
}
