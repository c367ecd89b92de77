//! `botswarm opcodes`: List the master opcodes bots react to.

use botswarm_core::Opcode;
use botswarm_dispatch::PacketDispatcher;

fn rows() -> Vec<(Opcode, &'static str)> {
    PacketDispatcher::with_default_handlers()
        .opcodes()
        .into_iter()
        .map(|op| (op, op.name().unwrap_or("?")))
        .collect()
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rows = rows();

    if json {
        let entries: Vec<serde_json::Value> = rows
            .iter()
            .map(|(op, name)| {
                serde_json::json!({
                    "opcode": format!("0x{:03X}", op.0),
                    "name": name,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("📡 Intercepted master opcodes ({})", rows.len());
    println!("================================");
    for (op, name) in &rows {
        println!("  0x{:03X}  {name}", op.0);
    }
    Ok(())
}
