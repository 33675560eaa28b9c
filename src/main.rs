mod entry;
mod logger;

use benchload::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
