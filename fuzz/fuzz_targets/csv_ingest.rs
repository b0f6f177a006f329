#![no_main]

use agentlens::config::DashboardConfig;
use agentlens::dashboard::DashboardReport;
use agentlens::ingest::load_dataset_from_reader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Ingestion and every panel must survive arbitrary CSV bytes
    if let Ok(dataset) = load_dataset_from_reader(data) {
        let report = DashboardReport::compute(&dataset.rows, dataset.rejected, &DashboardConfig::default());
        let _ = report.to_report_string();
    }
});
