/// Prints the swiper logo with version, shown by `start`.
pub fn print_logo() {
    let c = "\x1b[96m"; // Bright cyan, logo
    let d = "\x1b[90m"; // Dim gray, version
    let r = "\x1b[0m";
    let ver = format!("v{}", env!("CARGO_PKG_VERSION"));
    let pad = " ".repeat(30_usize.saturating_sub(ver.len()));

    println!();
    println!("  {c}█▀▀▀ █   █ ▀█▀ █▀▀█ █▀▀▀ █▀▀█{r}");
    println!("  {c}▀▀▀█ █ █ █  █  █▀▀▀ █▀▀  █▀▀▄{r}");
    println!("  {c}▀▀▀▀ ▀▀▀▀▀ ▀▀▀ ▀    ▀▀▀▀ ▀  ▀{r}");
    println!("{pad}{d}{ver}{r}");
}
