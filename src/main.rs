use std::io::{self, BufRead, Write};

use shiftdeskd::{api, ipc};

fn main() {
    let mut state = ipc::AppState::new();

    // The shell normally selects the backend via `backend.select`; the env var
    // lets a wrapper script pre-select it.
    if let Ok(base_url) = std::env::var("SHIFTDESK_API_URL") {
        match api::HttpShiftApi::new(&base_url) {
            Ok(client) => {
                state.backend_url = Some(client.base_url().to_string());
                state.api = Some(Box::new(client));
            }
            Err(e) => eprintln!("shiftdeskd: ignoring SHIFTDESK_API_URL: {e:#}"),
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply with an id; report and keep reading.
                let reply = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() },
                });
                let _ = writeln!(stdout, "{reply}");
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
