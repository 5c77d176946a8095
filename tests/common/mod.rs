//! Common test utilities and helpers

/// Sample data shared by unit and integration tests
pub mod fixtures {
    use peru_dashboard::models::{DataSet, Row};

    /// Small CSV in the dashboard's format, including a duplicate year for
    /// department 15 and a row for a code outside the table
    pub const SAMPLE_CSV: &str = "\
department,year,y_HH
1,1997,10
2,1997,20
15,2001,5.5
15,2001,6
1,1998,12
99,2000,1
";

    pub fn sample_dataset() -> DataSet {
        DataSet::from(vec![
            Row::record(1.0, 1997.0, 10.0),
            Row::record(2.0, 1997.0, 20.0),
            Row::record(15.0, 2001.0, 5.5),
            Row::record(15.0, 2001.0, 6.0),
            Row::record(1.0, 1998.0, 12.0),
            Row::record(99.0, 2000.0, 1.0),
        ])
    }
}

/// Logging utilities for tests
pub mod logging {
    use std::sync::Once;
    use tracing::{debug, info};

    static INIT: Once = Once::new();

    /// Initialize test logging
    pub fn init_test_logging() {
        INIT.call_once(|| {
            // test_log may already have installed a subscriber
            let _ = tracing::subscriber::set_global_default(
                tracing_subscriber::fmt()
                    .with_env_filter("peru_dashboard=debug,main=debug")
                    .with_test_writer()
                    .finish(),
            );
        });
    }

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }

    /// Log test data
    pub fn log_test_data<T: std::fmt::Debug>(label: &str, data: &T) {
        debug!("📊 {}: {:?}", label, data);
    }
}
