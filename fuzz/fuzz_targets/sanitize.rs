#![no_main]

use forthtalk::host::Directive;
use forthtalk::line::SourceLine;
use forthtalk::registers::RegisterTable;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let registers: RegisterTable = [("PORTB", "$25"), ("LED", "$20")].into_iter().collect();
        for raw in s.lines() {
            let line = SourceLine::new(raw);
            if line.is_command() {
                let _ = Directive::parse(line.text());
                continue;
            }
            // Both pipelines must accept any line without panicking
            let mut upload = line.clone();
            upload.sanitize_for_upload(&registers);
            let mut analysis = line;
            if analysis.sanitize_for_analysis(&registers) {
                let _ = forthtalk::frontend::scan::word_tokens(analysis.text());
            }
        }
    }
});
