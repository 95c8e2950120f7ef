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

use logforth_hipchat::Error;
use logforth_hipchat::append::hipchat::Bucket;
use logforth_hipchat::append::hipchat::Completion;
use logforth_hipchat::append::hipchat::DEFAULT_HOST;
use logforth_hipchat::append::hipchat::HipChatBuilder;
use logforth_hipchat::append::hipchat::Notifier;
use logforth_hipchat::append::hipchat::Response;
use logforth_hipchat::layout::BasicLayout;

/// Prints notifications instead of posting them, and reports every delivery as accepted.
#[derive(Debug)]
struct StderrNotifier {
    room: String,
    from: String,
    host: String,
    notify: bool,
}

impl StderrNotifier {
    fn new(room: &str, _token: &str) -> Self {
        Self {
            room: room.to_string(),
            from: String::new(),
            host: DEFAULT_HOST.to_string(),
            notify: false,
        }
    }
}

impl Notifier for StderrNotifier {
    fn set_room(&mut self, room: &str) {
        self.room = room.to_string();
    }

    fn set_from(&mut self, from: &str) {
        self.from = from.to_string();
    }

    fn set_host(&mut self, host: &str) {
        self.host = host.to_string();
    }

    fn set_notify(&mut self, notify: bool) {
        self.notify = notify;
    }

    fn send(&self, bucket: Bucket, message: String, completion: Completion) {
        eprintln!(
            "POST https://{}/v2/room/{}/notification [{bucket}] notify={} from={:?}: {message}",
            self.host, self.room, self.notify, self.from
        );
        completion.finish(None, Some(&Response::new(204, "")));
    }
}

fn main() {
    logforth_hipchat::builder()
        .dispatch(|d| {
            d.filter(log::LevelFilter::Debug).append(
                HipChatBuilder::new("ops", "token")
                    .from_label("stderr-demo")
                    .notify(true)
                    .layout(BasicLayout::default())
                    .response_callback(|err: Option<Error>, response: Option<&Response>| {
                        if let Some(err) = err {
                            eprintln!("delivery failed: {err}");
                        } else if let Some(response) = response {
                            eprintln!("delivered with status {}", response.status());
                        }
                        Ok(())
                    })
                    .build(StderrNotifier::new),
            )
        })
        .apply();

    log::debug!("cache warmed");
    log::info!("deploy finished");
    log::warn!("disk usage at 91%");
    log::error!("payment provider unreachable");
}
