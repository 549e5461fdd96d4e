//! rTimestore main entrypoint.

use rtimestore::run;
use rtimestore::ui::messages::error;

#[tokio::main]
async fn main() {
    println!();
    if let Err(e) = run().await {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
