//! Renders a package's models file: one record type per model, plus a
//! validation impl for models that need one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use crate::error::Error;
use crate::mapper::{build_model_plans, FieldPlan, ModelPlan};
use crate::schema::ModelDefinition;

/// Renders the models file. Models and fields are sorted by emitted name;
/// each field keeps its wire name for serialization.
pub fn render_models(models: &BTreeMap<String, ModelDefinition>) -> Result<String, Error> {
    let plans = build_model_plans(models)?;

    let mut out = String::from("use serde::{Deserialize, Serialize};\n");
    if plans
        .iter()
        .any(|m| m.fields.iter().any(|f| f.rust_type.contains("BTreeMap")))
    {
        out.push_str("use std::collections::BTreeMap;\n");
    }
    if plans.iter().any(ModelPlan::has_validation) {
        out.push_str("\nuse strata_sdk::ModelWithValidation;\n");
    }

    let constant_imports: BTreeSet<&str> = plans
        .iter()
        .flat_map(|m| m.fields.iter())
        .filter_map(|f| f.constant_type.as_deref())
        .collect();
    if !constant_imports.is_empty() {
        let names: Vec<&str> = constant_imports.into_iter().collect();
        let _ = writeln!(out, "\nuse super::constants::{{{}}};", names.join(", "));
    }

    for plan in &plans {
        out.push('\n');
        out.push_str(&struct_for_model(plan));

        if plan.has_validation() {
            out.push('\n');
            out.push_str(&validation_for_model(plan));
        }
    }

    Ok(out)
}

fn struct_for_model(plan: &ModelPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#[derive(Clone, Debug, Deserialize, Serialize)]");
    let _ = writeln!(out, "pub struct {} {{", plan.name);
    for field in &plan.fields {
        out.push_str(&serde_attribute(field));
        let _ = writeln!(out, "    pub {}: {},", field.name, field.rust_type);
    }
    out.push_str("}\n");
    out
}

fn serde_attribute(field: &FieldPlan) -> String {
    if field.optional {
        format!(
            "    #[serde(rename = {:?}, skip_serializing_if = \"Option::is_none\")]\n",
            field.wire_name
        )
    } else {
        format!("    #[serde(rename = {:?})]\n", field.wire_name)
    }
}

fn validation_for_model(plan: &ModelPlan) -> String {
    let mut checks = Vec::new();
    for field in &plan.fields {
        if field.required_string {
            checks.push(format!(
                "        if self.{name}.is_empty() {{\n            errors.push(\"`{name}` cannot be empty\".to_string());\n        }}\n",
                name = field.name
            ));
        }
        if field.range_validation {
            // range checking is unimplemented; the stub keeps it visible
            checks.push(format!(
                "        // TODO: range validation for `{}`\n",
                field.name
            ));
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "impl ModelWithValidation for {} {{", plan.name);
    out.push_str("    fn validate(&self) -> Result<(), Vec<String>> {\n");
    out.push_str("        let mut errors = Vec::new();\n\n");
    out.push_str(&checks.join("\n"));
    out.push('\n');
    out.push_str("        if errors.is_empty() {\n");
    out.push_str("            Ok(())\n");
    out.push_str("        } else {\n");
    out.push_str("            Err(errors)\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}
