//! Describe command implementation

use anyhow::Result;
use serde::Serialize;

use arche::ArchetypeSpec;

use crate::utils::resolve_archetype;

#[derive(Serialize)]
struct ArchetypeInfo {
    name: &'static str,
    short_name: &'static str,
    indicator: &'static str,
    doc: &'static str,
    fields: Vec<FieldInfo>,
}

#[derive(Serialize)]
struct FieldInfo {
    name: &'static str,
    component: &'static str,
    data_type: String,
    doc: &'static str,
}

pub fn run(archetype: Option<String>, json: bool) -> Result<()> {
    let specs = match &archetype {
        Some(name) => vec![resolve_archetype(name)?],
        None => arche::registry().to_vec(),
    };
    let infos: Vec<_> = specs.into_iter().map(archetype_info).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else if archetype.is_some() {
        for info in &infos {
            print_details(info);
        }
    } else {
        for info in &infos {
            println!("{:<24} {} field(s)  {}", info.short_name, info.fields.len(), info.name);
        }
    }
    Ok(())
}

fn archetype_info(spec: &'static ArchetypeSpec) -> ArchetypeInfo {
    ArchetypeInfo {
        name: spec.name,
        short_name: spec.short_name(),
        indicator: spec.indicator,
        doc: spec.doc,
        fields: spec
            .fields
            .iter()
            .map(|field| FieldInfo {
                name: field.name,
                component: field.component.name,
                data_type: (field.component.data_type)().to_string(),
                doc: field.doc,
            })
            .collect(),
    }
}

fn print_details(info: &ArchetypeInfo) {
    println!("{}", info.name);
    println!("  {}", info.doc);
    println!("  indicator: {}", info.indicator);
    for field in &info.fields {
        println!("  {:<14} {:<36} {}", field.name, field.component, field.data_type);
        if !field.doc.is_empty() {
            println!("  {:<14} {}", "", field.doc);
        }
    }
}
