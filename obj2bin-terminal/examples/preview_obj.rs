/// Example: Preview an OBJ file directly, without writing a binary mesh
///
/// Usage: cargo run --example preview_obj -- path/to/file.obj

use obj2bin_core::convert::read_obj;
use obj2bin_terminal::TerminalApp;
use std::env;
use std::io;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        std::process::exit(2);
    }

    let obj_path = &args[1];
    println!("Loading OBJ file: {}", obj_path);

    let model = read_obj(obj_path)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    println!(
        "Loaded {} vertices, {} triangles",
        model.vertices.len(),
        model.mesh.len()
    );
    println!("Starting terminal preview (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(model.mesh)?;
    app.run()
}
