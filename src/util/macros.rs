#[cfg(test)]
macro_rules! assert_err {
    ($expr:expr, $msg:expr $(, $($other:tt)* )?) => {
        assert_eq!(
            $expr.map_err(|err| err.to_string()),
            Err($msg.to_string()),
            $($($other)*)?
        )
    }
}

#[cfg(test)]
macro_rules! assert_ok {
    ($expr:expr, $value:expr $(, $($other:tt)*)?) => {
        assert_eq!(
            $expr.map_err(|err| err.to_string()),
            Ok($value),
            $($($other)*)?
        )
    }
}
