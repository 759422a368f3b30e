// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

/// Timestamped logging to stdout, compiled only when the `logging` feature is enabled.
/// The message is prefixed with the module that emitted it, so output from the different
/// partitioners can be told apart in a single run.
#[macro_export]
macro_rules! log {
    ($message:expr) => {{
        #[cfg(feature = "logging")]
        {
            use chrono::Local;
            println!(
                "{} [{}]: {}",
                Local::now().format("%H:%M:%S%.3f"),
                module_path!(),
                $message
            );
        }
    }};
    ($fmt:expr, $($args:tt)*) => {{
        #[cfg(feature = "logging")]
        {
            use chrono::Local;
            let message = format!($fmt, $($args)*);
            println!(
                "{} [{}]: {}",
                Local::now().format("%H:%M:%S%.3f"),
                module_path!(),
                message
            );
        }
    }};
}

/// Logs once for every completed decile of `$total_work_length` units of work.
#[macro_export]
macro_rules! progress_meter {
    ($fmt: expr, $current_work_index: expr, $total_work_length: expr) => {{
        #[cfg(feature = "logging")]
        {
            let total: usize = $total_work_length;
            let current: usize = $current_work_index;
            if total > 0 {
                let previous_decile: usize = current * 10 / total;
                let decile: usize = (current + 1) * 10 / total;
                if decile != previous_decile {
                    $crate::log!($fmt, decile * 10);
                }
            }
        }
    }};
}
