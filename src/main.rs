mod entry;
mod logger;

use howlite_loadtest::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
