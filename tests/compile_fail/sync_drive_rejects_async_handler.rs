//! Test that an awaiting handler function cannot drive a synchronous loop.

use resumable::computation::perform;
use resumable::drive::drive_sync;
use resumable::handler::from_async_fn;

fn main() {
    let handler = from_async_fn(|_: &&str, _: &[String]| async { Ok::<_, ()>(None) });
    let _ = drive_sync(perform::<_, String, ()>("name_missing"), handler);
}
