// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::sync::Mutex;

use logforth_hipchat::Error;
use logforth_hipchat::Trap;
use logforth_hipchat::append::hipchat::Bucket;
use logforth_hipchat::append::hipchat::HipChatBuilder;
use logforth_hipchat::append::hipchat::RecordingNotifier;
use logforth_hipchat::layout::PatternLayout;

#[derive(Debug, Default, Clone)]
struct CollectTrap(Arc<Mutex<Vec<String>>>);

impl Trap for CollectTrap {
    fn trap(&self, err: &Error) {
        self.0.lock().unwrap().push(err.to_string());
    }
}

// The global logger can be installed once per process, so everything runs in one test.
#[test]
fn log_macros_reach_the_notifier() {
    let notifier = RecordingNotifier::new("", "");
    let trap = CollectTrap::default();

    let appender = HipChatBuilder::new("ops", "secret")
        .from_label("deploy-bot")
        .layout(PatternLayout::new("%p %c - %m"))
        .trap(trap.clone())
        .build({
            let notifier = notifier.clone();
            move |_: &str, _: &str| notifier
        });

    logforth_hipchat::builder()
        .dispatch(|d| d.filter(log::LevelFilter::Info).append(appender))
        .apply();

    log::debug!(target: "billing", "dropped by the filter");
    log::info!(target: "billing", "invoice {} sent", 42);
    log::warn!(target: "billing", "retrying payment");
    log::error!(target: "billing", "payment failed");

    assert_eq!(notifier.room(), "ops");
    assert_eq!(notifier.from_label(), "deploy-bot");

    let deliveries = notifier.take_deliveries();
    let delivered: Vec<_> = deliveries
        .iter()
        .map(|delivery| (delivery.bucket(), delivery.message().to_string()))
        .collect();
    assert_eq!(
        delivered,
        vec![
            (Bucket::Success, "INFO billing - invoice 42 sent".to_string()),
            (Bucket::Warning, "WARN billing - retrying payment".to_string()),
            (Bucket::Failure, "ERROR billing - payment failed".to_string()),
        ]
    );

    // the default callback raises, and finishing hands the error to the trap
    for delivery in deliveries {
        delivery
            .into_completion()
            .finish(Some(Error::new("401 Unauthorized")), None);
    }
    assert_eq!(trap.0.lock().unwrap().len(), 3);
    assert_eq!(trap.0.lock().unwrap()[0], "401 Unauthorized");
}
