use std::fmt;

/// Template plus target of a Formatter value; rendering happens in `Display`.
///
/// Templates are literal text with `{}`, `{:?}` and `{:#?}` placeholders. `{}` and `{:?}` are
/// replaced by the target's `Debug` output, `{:#?}` by its alternate `Debug` output. `{{` and `}}`
/// produce single braces; any other brace is copied as is.
#[derive(Clone, Copy)]
pub struct Formatted<'a> {
	template: &'a str,
	target: &'a (dyn fmt::Debug + Send + Sync),
}

impl<'a> Formatted<'a> {
	/// Pair a template with its target.
	pub fn new(template: &'a str, target: &'a (dyn fmt::Debug + Send + Sync)) -> Self {
		Self { template, target }
	}

	/// Format template.
	pub fn template(&self) -> &'a str {
		self.template
	}

	/// Object the template is applied to.
	pub fn target(&self) -> &'a (dyn fmt::Debug + Send + Sync) {
		self.target
	}
}

impl fmt::Display for Formatted<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut rest = self.template;
		while let Some(pos) = rest.find(['{', '}']) {
			f.write_str(&rest[..pos])?;
			rest = &rest[pos..];
			if let Some(tail) = rest.strip_prefix("{{") {
				f.write_str("{")?;
				rest = tail;
			} else if let Some(tail) = rest.strip_prefix("}}") {
				f.write_str("}")?;
				rest = tail;
			} else if let Some(tail) = rest.strip_prefix("{}").or_else(|| rest.strip_prefix("{:?}")) {
				write!(f, "{:?}", self.target)?;
				rest = tail;
			} else if let Some(tail) = rest.strip_prefix("{:#?}") {
				write!(f, "{:#?}", self.target)?;
				rest = tail;
			} else {
				f.write_str(&rest[..1])?;
				rest = &rest[1..];
			}
		}
		f.write_str(rest)
	}
}

impl fmt::Debug for Formatted<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Formatted").field("template", &self.template).field("target", &self.target).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::Formatted;

	#[test]
	fn parts_are_exposed() {
		let target = 5_u8;
		let formatted = Formatted::new("n={}", &target);
		assert_eq!(formatted.template(), "n={}");
		assert_eq!(format!("{:?}", formatted.target()), "5");
	}

	fn render(template: &str) -> String {
		Formatted::new(template, &Some(3)).to_string()
	}

	#[test]
	fn placeholders_use_debug() {
		assert_eq!(render("p={}"), "p=Some(3)");
		assert_eq!(render("p={:?}"), "p=Some(3)");
		assert_eq!(render("{:?}|{:?}"), "Some(3)|Some(3)");
		assert_eq!(render("{:#?}"), "Some(\n    3,\n)");
	}

	#[test]
	fn escapes_and_unknown_braces() {
		assert_eq!(render("{{literal}}"), "{literal}");
		assert_eq!(render("{x} } {:x}"), "{x} } {:x}");
		assert_eq!(render("no placeholder"), "no placeholder");
		assert_eq!(render(""), "");
		assert_eq!(render("trailing {"), "trailing {");
	}
}
