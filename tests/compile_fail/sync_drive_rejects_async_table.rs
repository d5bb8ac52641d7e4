//! Test that an asynchronous table cannot drive a synchronous loop.

use resumable::computation::perform;
use resumable::drive::drive_sync;
use resumable::handler::AsyncHandlerTable;

fn main() {
    let handler = AsyncHandlerTable::<&str, String, ()>::new().with_value("name_missing", "Baba".to_string());
    let _ = drive_sync(perform::<_, String, ()>("name_missing"), handler);
}
