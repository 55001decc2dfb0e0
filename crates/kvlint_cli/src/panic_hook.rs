//! The custom panic hook used by the linter to issue a more descriptive explanation.

use std::io::{self, Write};
use std::panic::PanicInfo;

pub fn panic_hook(info: &PanicInfo) {
    let stderr = io::stderr();
    let mut stderr_lock = stderr.lock();

    // nothing sensible is left to do if stderr is gone
    let mut write = |msg: &str| {
        let _ = writeln!(stderr_lock, "{}", msg);
    };

    write("kvlint panicked unexpectedly. This is a bug.\n");
    write("Please include the following info in a bug report: \n");

    let msg = info
        .payload()
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| {
            info.payload()
                .downcast_ref::<&str>()
                .map(|x| x.to_string())
        })
        .unwrap_or_default();

    let location = info
        .location()
        .map(|l| format!("{}", l))
        .unwrap_or_default();

    write(format!("message: {}", msg).as_str());
    write(format!("location: {}", location).as_str());
    std::process::exit(-1);
}
