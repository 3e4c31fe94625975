use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub schemas_generated: usize,
  pub types_generated: usize,
  pub circular_schemas: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  /// Named schemas scoring at or above the complexity threshold, with their score.
  pub complex_schemas: Vec<(String, i64)>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_schemas(&mut self, count: usize) {
    self.schemas_generated += count;
  }

  pub fn record_types(&mut self, count: usize) {
    self.types_generated += count;
  }

  pub fn record_circular(&mut self, count: usize) {
    self.circular_schemas += count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_complex_schema(&mut self, name: impl Into<String>, score: i64) {
    self.complex_schemas.push((name.into(), score));
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Schema '{schema_name}': {schema_type} enum has no values of its type, emitting z.never()")]
  ImpossibleEnum { schema_name: String, schema_type: String },
  #[strum(to_string = "Schema '{schema_name}': properties ignored because additionalProperties makes it a record")]
  PropertiesIgnoredForRecord { schema_name: String },
}
