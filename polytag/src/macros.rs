// `vec![elem; size]` for sizes read from a file, `?` on allocation failure
macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// err!(Kind) and err!(Kind("message")) return `Err` with that `ErrorKind`
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::PolytagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::PolytagError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// A `FileDecodingError` for a `FileType`
//
// decode_err!(Flac, "message") builds the error, decode_err!(@BAIL Flac, "message") returns it
macro_rules! decode_err {
	($file_ty:ident, $reason:literal) => {
		Into::<crate::error::PolytagError>::into(crate::error::FileDecodingError::new(
			crate::file::FileType::$file_ty,
			$reason,
		))
	};
	(@BAIL $file_ty:ident, $reason:literal) => {
		return Err(decode_err!($file_ty, $reason))
	};
}

// Return a `BackendEncode` error for a `BackendKind`, the message takes `format!` arguments
macro_rules! encode_err {
	(@BAIL $kind:ident, $($arg:tt)+) => {
		return Err(crate::error::PolytagError::backend_encode(
			crate::tag::BackendKind::$kind,
			format!($($arg)+),
		))
	};
}

// Branch on a `ParsingMode`
//
// STRICT and RELAXED are optional and fall back to DEFAULT, which also covers `BestAttempt`:
//
// parse_mode_choice!(
// 	parse_mode,
// 	STRICT: expr,
// 	RELAXED: expr,
// 	DEFAULT: expr
// )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr,)?
		DEFAULT: $default:expr
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			$(crate::config::ParsingMode::Relaxed => { $relaxed_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
}

pub(crate) use {decode_err, encode_err, err, parse_mode_choice, try_vec};
