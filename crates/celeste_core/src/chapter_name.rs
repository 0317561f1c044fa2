pub const PROLOGUE_ID: i32 = 0;
pub const EPILOGUE_ID: i32 = 8;
/// Substituted when a chapter node has no usable `ID` attribute.
pub const MISSING_ID: i32 = -1;

/// Display name for a zero-based area id.
///
/// Display numbering skips the epilogue slot, so ids above 8 show one less.
/// Negative ids, including [`MISSING_ID`], fall through to `"Chapter {id}"`.
pub fn chapter_name(id: i32) -> String {
    match id {
        PROLOGUE_ID => "Prologue".to_string(),
        EPILOGUE_ID => "Epilogue".to_string(),
        id if id < EPILOGUE_ID => format!("Chapter {id}"),
        id => format!("Chapter {}", id - 1),
    }
}

/// Prologue and epilogue have a single playable side.
pub fn is_single_side(name: &str) -> bool {
    !name.starts_with('C')
}
