//! `benchie modes`

use anyhow::Result;
use benchie_core::SchemaRegistry;

pub fn cmd_modes() -> Result<()> {
  for schema in SchemaRegistry::all() {
    println!("{} (Mode: {})", schema.mode().label(), schema.mode().tag());
    for name in schema.metric_names() {
      println!("  {}", name);
    }
    println!();
  }
  Ok(())
}
