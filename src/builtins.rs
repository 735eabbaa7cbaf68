//! Callables the command-line host registers before parsing.
//!
//! | name | arguments | result |
//! |------|-----------|--------|
//! | `echo` | any | arguments joined by spaces, also printed |
//! | `fail` | optional message | always an error |
//! | `identity` | `value` | `value` |
//! | `math.add`, `math.sub`, `math.mul`, `math.div` | `a`, `b` | number |
//! | `math.sum` | any numbers | number |
//! | `str.upper`, `str.lower`, `str.len` | `text` | string or length |
//! | `str.concat` | any | arguments joined |
//! | `str.join` | `sep`, values | values joined by `sep` |
//! | `time.sleep` | `seconds` | unit |
//! | `env.get` | `name`, `-default=` | variable or default |
//!
//! Numbers may be given as typed literals or as untyped text.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::eval::value::{Number, Value, ValueMap};
use crate::registry::{argument, CallResult, Callable, CallableError, Registry};

pub fn standard_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register_fn("echo", echo)
        .register_fn("fail", fail)
        .register_fn("identity", |args, kwargs| {
            argument(&args, &kwargs, 0, "value").cloned()
        });

    registry
        .register_fn("math.add", |args, kwargs| {
            arithmetic(&args, &kwargs, i64::checked_add, |a, b| a + b)
        })
        .register_fn("math.sub", |args, kwargs| {
            arithmetic(&args, &kwargs, i64::checked_sub, |a, b| a - b)
        })
        .register_fn("math.mul", |args, kwargs| {
            arithmetic(&args, &kwargs, i64::checked_mul, |a, b| a * b)
        })
        .register_fn("math.div", divide)
        .register_fn("math.sum", |args, _| sum(&args));

    registry
        .register_fn("str.upper", |args, kwargs| {
            text(&args, &kwargs).map(|s| Value::String(s.to_uppercase()))
        })
        .register_fn("str.lower", |args, kwargs| {
            text(&args, &kwargs).map(|s| Value::String(s.to_lowercase()))
        })
        .register_fn("str.concat", |args, _| {
            Ok(Value::String(args.iter().map(Value::to_string).collect()))
        })
        .register_fn("str.join", join)
        .register_fn("str.len", length);

    registry
        .register("time.sleep", Arc::new(Sleep))
        .register_fn("env.get", env_get);
    registry
}

fn echo(args: Vec<Value>, _kwargs: ValueMap) -> CallResult {
    let line = args
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    Ok(Value::String(line))
}

fn fail(args: Vec<Value>, kwargs: ValueMap) -> CallResult {
    let message = argument(&args, &kwargs, 0, "message")
        .map(Value::to_string)
        .unwrap_or_else(|_| "fail was called".to_string());
    Err(CallableError::Failed(message))
}

fn number(value: &Value, name: &str) -> Result<Number, CallableError> {
    value
        .as_number()
        .ok_or_else(|| CallableError::invalid(name, format!("`{}` is not a number", value)))
}

fn operands(args: &[Value], kwargs: &ValueMap) -> Result<(Number, Number), CallableError> {
    let a = number(argument(args, kwargs, 0, "a")?, "a")?;
    let b = number(argument(args, kwargs, 1, "b")?, "b")?;
    Ok((a, b))
}

/// Integers stay integers; anything involving a float is computed as a float.
fn arithmetic(
    args: &[Value],
    kwargs: &ValueMap,
    integer: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
) -> CallResult {
    match operands(args, kwargs)? {
        (Number::Integer(a), Number::Integer(b)) => integer(a, b)
            .map(Value::Integer)
            .ok_or_else(|| CallableError::failed("integer overflow")),
        (a, b) => Ok(Value::Float(float(a.as_f64(), b.as_f64()))),
    }
}

fn divide(args: Vec<Value>, kwargs: ValueMap) -> CallResult {
    let (_, divisor) = operands(&args, &kwargs)?;
    if divisor.as_f64() == 0.0 {
        return Err(CallableError::failed("division by zero"));
    }
    arithmetic(&args, &kwargs, i64::checked_div, |a, b| a / b)
}

fn sum(args: &[Value]) -> CallResult {
    args.iter()
        .enumerate()
        .try_fold(Number::Integer(0), |total, (index, value)| {
            let value = number(value, &index.to_string())?;
            Ok(match (total, value) {
                (Number::Integer(a), Number::Integer(b)) => a
                    .checked_add(b)
                    .map(Number::Integer)
                    .ok_or_else(|| CallableError::failed("integer overflow"))?,
                (a, b) => Number::Float(a.as_f64() + b.as_f64()),
            })
        })
        .map(Value::from)
}

fn text(args: &[Value], kwargs: &ValueMap) -> Result<String, CallableError> {
    argument(args, kwargs, 0, "text").map(Value::to_string)
}

fn join(args: Vec<Value>, kwargs: ValueMap) -> CallResult {
    let (separator, values) = match kwargs.get_str("sep") {
        Some(separator) => (separator.to_string(), &args[..]),
        None => match args.split_first() {
            Some((separator, values)) => (separator.to_string(), values),
            None => return Err(CallableError::MissingArgument("sep".to_string())),
        },
    };
    // A single list argument is joined element by element.
    let values = match values {
        [Value::List(items)] => &items[..],
        values => values,
    };
    Ok(Value::String(
        values
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(&separator),
    ))
}

fn length(args: Vec<Value>, kwargs: ValueMap) -> CallResult {
    let len = match argument(&args, &kwargs, 0, "value")? {
        Value::String(s) => s.chars().count(),
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        other => {
            return Err(CallableError::invalid(
                "value",
                format!("{} has no length", other.type_name()),
            ))
        }
    };
    i64::try_from(len)
        .map(Value::Integer)
        .map_err(|e| CallableError::Other(Box::new(e)))
}

fn env_get(args: Vec<Value>, kwargs: ValueMap) -> CallResult {
    let name = argument(&args, &kwargs, 0, "name")?.to_string();
    match std::env::var(&name) {
        Ok(value) => Ok(Value::String(value)),
        Err(e) => match kwargs.get_str("default") {
            Some(default) => Ok(default.clone()),
            None => Err(CallableError::failed(format!("{}: {}", name, e))),
        },
    }
}

/// `time.sleep(seconds)`: waits on the tokio timer without blocking a worker.
struct Sleep;

#[async_trait]
impl Callable for Sleep {
    async fn call(&self, args: Vec<Value>, kwargs: ValueMap) -> CallResult {
        let seconds = number(argument(&args, &kwargs, 0, "seconds")?, "seconds")?.as_f64();
        let duration = Duration::try_from_secs_f64(seconds)
            .map_err(|e| CallableError::invalid("seconds", e.to_string()))?;
        debug!(?duration, "sleeping");
        tokio::time::sleep(duration).await;
        Ok(Value::Unit)
    }

    fn name(&self) -> &str {
        "time.sleep"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn call(name: &str, args: Vec<Value>) -> CallResult {
        call_with(name, args, ValueMap::new()).await
    }

    async fn call_with(name: &str, args: Vec<Value>, kwargs: ValueMap) -> CallResult {
        let callable = standard_registry().resolve(name).unwrap();
        callable.call(args, kwargs).await
    }

    #[test]
    fn test_registered_names() {
        let names = standard_registry().names();
        for name in ["echo", "fail", "identity", "math.add", "str.join", "time.sleep", "env.get"] {
            assert!(names.contains(&name.to_string()), "missing {}", name);
        }
    }

    #[tokio::test]
    async fn test_math() {
        assert_eq!(
            call("math.add", vec!["2".into(), "3".into()]).await.unwrap(),
            Value::Integer(5)
        );
        assert_eq!(
            call("math.mul", vec![Value::Integer(2), Value::Float(1.5)])
                .await
                .unwrap(),
            Value::Float(3.0)
        );
        assert_eq!(
            call("math.sub", vec![Value::Integer(2), Value::Integer(5)])
                .await
                .unwrap(),
            Value::Integer(-3)
        );
        assert_eq!(
            call("math.div", vec![Value::Integer(7), Value::Integer(2)])
                .await
                .unwrap(),
            Value::Integer(3)
        );
        assert!(call("math.div", vec![Value::Integer(1), Value::Integer(0)])
            .await
            .is_err());
        assert!(matches!(
            call("math.add", vec!["x".into(), "1".into()]).await,
            Err(CallableError::InvalidArgument { .. })
        ));
        assert_eq!(
            call("math.sum", vec!["1".into(), Value::Integer(2), Value::Float(0.5)])
                .await
                .unwrap(),
            Value::Float(3.5)
        );
        assert_eq!(call("math.sum", vec![]).await.unwrap(), Value::Integer(0));
    }

    #[tokio::test]
    async fn test_strings() {
        assert_eq!(
            call("str.upper", vec!["abc".into()]).await.unwrap(),
            Value::from("ABC")
        );
        assert_eq!(
            call("str.join", vec!["-".into(), "a".into(), Value::Integer(1)])
                .await
                .unwrap(),
            Value::from("a-1")
        );
        let mut kwargs = ValueMap::new();
        kwargs.insert("sep".into(), ", ".into());
        let list = Value::List(vec!["x".into(), "y".into()]);
        assert_eq!(
            call_with("str.join", vec![list], kwargs).await.unwrap(),
            Value::from("x, y")
        );
        assert_eq!(
            call("str.len", vec!["héllo".into()]).await.unwrap(),
            Value::Integer(5)
        );
        assert_eq!(
            call("str.concat", vec!["a".into(), Value::Boolean(true)])
                .await
                .unwrap(),
            Value::from("atrue")
        );
    }

    #[tokio::test]
    async fn test_fail_and_identity() {
        let err = call("fail", vec!["nope".into()]).await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
        assert_eq!(
            call("identity", vec![Value::Integer(4)]).await.unwrap(),
            Value::Integer(4)
        );
        assert!(matches!(
            call("identity", vec![]).await,
            Err(CallableError::MissingArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_env_default() {
        let mut kwargs = ValueMap::new();
        kwargs.insert("default".into(), "fallback".into());
        assert_eq!(
            call_with("env.get", vec!["RUNEVENT_SURELY_UNSET_VARIABLE".into()], kwargs)
                .await
                .unwrap(),
            Value::from("fallback")
        );
        assert!(call("env.get", vec!["RUNEVENT_SURELY_UNSET_VARIABLE".into()])
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_sleep() {
        assert_eq!(
            call("time.sleep", vec![Value::Float(0.01)]).await.unwrap(),
            Value::Unit
        );
        assert!(call("time.sleep", vec![Value::Integer(-1)]).await.is_err());
    }
}
