use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::{GroceryList, WeeklyPlan};

/// Write a grocery list as CSV, one row per item.
pub fn write_grocery_csv(list: &GroceryList, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["category", "name", "quantity", "unit", "price"])?;
    for item in &list.items {
        wtr.write_record([
            item.category.clone(),
            item.name.clone(),
            format!("{:.1}", item.quantity),
            item.unit.clone(),
            format!("{:.2}", item.price),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a weekly plan as pretty JSON in its wire format.
pub fn write_plan_json(plan: &WeeklyPlan, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, plan)?;
    writer.flush()?;
    Ok(())
}

/// Read a plan written by [`write_plan_json`].
pub fn load_plan_json(path: &Path) -> Result<WeeklyPlan> {
    let file = File::open(path)?;
    let plan = serde_json::from_reader(BufReader::new(file))?;
    Ok(plan)
}
