//! Document model for Robot Framework files and its round-trip writer
pub mod dumper;
pub mod executables;
pub mod file;
pub mod settings;
pub mod table;
pub mod variables;

pub use dumper::{DumpOptions, dump, dump_with};
pub use executables::{
    ExecutableBody, ExecutableKind, ExecutableRow, ExecutableSetting, ExecutableSettingKind,
    TestCase, UserKeyword,
};
pub use file::{
    ElementId, ElementLocation, LineElement, RobotFile, RobotLine, TableKind, TokenId,
};
pub use settings::{Setting, SettingKind};
pub use table::{ModelElement, Table, TableHeader};
pub use variables::{DictionaryItem, Variable, VariableType, classify_scalar, split_key_value};
