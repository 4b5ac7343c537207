//! Helper functions registered on every template.
//!
//! Go's built-ins (`and`, `or`, `not`, `len`, `index`, `eq`, `ne`, `lt`,
//! `le`, `gt`, `ge`, `print`, ...) come with the engine. Any other name is
//! a compile error.

use chrono::Local;
use gtmpl::{Func, FuncError, Template, Value};

pub const HELPERS: [(&str, Func); 9] = [
    ("path_join", path_join_helper),
    ("split", split_helper),
    ("trim", trim_helper),
    ("join", join_helper),
    ("add", add_helper),
    ("first", first_helper),
    ("last", last_helper),
    ("now", now_helper),
    ("today", today_helper),
];

pub fn register_helpers(template: &mut Template) {
    for (name, func) in HELPERS {
        template.add_func(name, func);
    }
}

/// Sorted helper names, for startup logging.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = HELPERS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

/// `path_join "a" "b/c"` joins non-empty parts with `/` and cleans the result.
fn path_join_helper(args: &[Value]) -> Result<Value, FuncError> {
    let parts = args
        .iter()
        .map(|a| string_arg("path_join", a))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::from(path_join(&parts)))
}

fn split_helper(args: &[Value]) -> Result<Value, FuncError> {
    arity("split", args, 2)?;
    let s = string_arg("split", &args[0])?;
    let sep = string_arg("split", &args[1])?;
    Ok(Value::Array(split(s, sep).into_iter().map(Value::from).collect()))
}

/// `trim s cutset` removes every cutset character from both ends.
fn trim_helper(args: &[Value]) -> Result<Value, FuncError> {
    arity("trim", args, 2)?;
    let s = string_arg("trim", &args[0])?;
    let cutset = string_arg("trim", &args[1])?;
    Ok(Value::from(s.trim_matches(|c| cutset.contains(c)).to_string()))
}

/// `join list sep`; non-string elements are skipped.
fn join_helper(args: &[Value]) -> Result<Value, FuncError> {
    arity("join", args, 2)?;
    let items = array_arg("join", &args[0])?;
    let sep = string_arg("join", &args[1])?;
    let strings: Vec<&str> = items
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    Ok(Value::from(strings.join(sep)))
}

fn add_helper(args: &[Value]) -> Result<Value, FuncError> {
    arity("add", args, 2)?;
    let (Value::Number(x), Value::Number(y)) = (&args[0], &args[1]) else {
        return Err(generic(format!(
            "wrong type for value in add; expected number; got {} and {}",
            type_name(&args[0]),
            type_name(&args[1])
        )));
    };
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        if let Some(sum) = x.checked_add(y) {
            return Ok(Value::from(sum));
        }
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(x), Some(y)) => Ok(Value::from(x + y)),
        _ => Err(generic("error calling add: not a finite number")),
    }
}

fn first_helper(args: &[Value]) -> Result<Value, FuncError> {
    arity("first", args, 1)?;
    array_arg("first", &args[0])?
        .first()
        .cloned()
        .ok_or_else(|| generic("error calling first: empty sequence"))
}

fn last_helper(args: &[Value]) -> Result<Value, FuncError> {
    arity("last", args, 1)?;
    array_arg("last", &args[0])?
        .last()
        .cloned()
        .ok_or_else(|| generic("error calling last: empty sequence"))
}

fn now_helper(args: &[Value]) -> Result<Value, FuncError> {
    arity("now", args, 0)?;
    Ok(Value::from(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()))
}

fn today_helper(args: &[Value]) -> Result<Value, FuncError> {
    arity("today", args, 0)?;
    Ok(Value::from(Local::now().format("%Y-%m-%d").to_string()))
}

fn generic(message: impl Into<String>) -> FuncError {
    FuncError::Generic(message.into())
}

fn arity(name: &str, args: &[Value], want: usize) -> Result<(), FuncError> {
    if args.len() != want {
        return Err(generic(format!(
            "wrong number of args for {}: want {} got {}",
            name,
            want,
            args.len()
        )));
    }
    Ok(())
}

fn string_arg<'a>(name: &str, v: &'a Value) -> Result<&'a str, FuncError> {
    match v {
        Value::String(s) => Ok(s.as_str()),
        other => Err(generic(format!(
            "wrong type for value in {}; expected string; got {}",
            name,
            type_name(other)
        ))),
    }
}

fn array_arg<'a>(name: &str, v: &'a Value) -> Result<&'a [Value], FuncError> {
    match v {
        Value::Array(items) => Ok(items.as_slice()),
        other => Err(generic(format!(
            "wrong type for value in {}; expected sequence; got {}",
            name,
            type_name(other)
        ))),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::NoValue | Value::Nil => "nil",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.as_i64().is_some() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Map(_) | Value::Object(_) => "map",
        _ => "func",
    }
}

/// Join non-empty parts with `/` and clean the result lexically.
pub fn path_join(parts: &[&str]) -> String {
    let non_empty: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    if non_empty.is_empty() {
        return String::new();
    }
    clean_path(&non_empty.join("/"))
}

/// Lexical path cleanup: collapse `//`, drop `.`, resolve `..`.
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if out.last().is_some_and(|s| *s != "..") {
                    out.pop();
                } else if !rooted {
                    out.push("..");
                }
            }
            s => out.push(s),
        }
    }
    let joined = out.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Split around every `sep`; an empty separator splits into characters.
pub fn split(s: &str, sep: &str) -> Vec<String> {
    if sep.is_empty() {
        return s.chars().map(String::from).collect();
    }
    s.split(sep).map(str::to_string).collect()
}
