// build.rs

fn main() {
    // --- Link against Xlib ---
    // Try pkg-config first; if the .pc file is missing fall back to manual flags.
    if let Err(e) = pkg_config::probe_library("x11") {
        eprintln!(
            "pkg-config failed for library 'x11' ({}). Falling back to manual linking.",
            e
        );
        println!("cargo:rustc-link-lib=X11");
        println!("cargo:rustc-link-search=/usr/lib");
        eprintln!("Manual linking flags applied. Ensure the X11 development library is installed.");
    } else {
        eprintln!("pkg-config found x11. Linking configured automatically.");
    }
}
