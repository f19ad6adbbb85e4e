use crate::PrintCfg;

use super::Print;
use super::PrintExt;

pub fn print_to_string<T: Print>(this: &T, cfg: Option<&PrintCfg>) -> String {
    let mut buf = Vec::new();
    let def = PrintCfg::default();
    let cfg = cfg.unwrap_or(&def);
    // Rendering into a `Vec` cannot fail.
    let _ = this.print_io(cfg, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
