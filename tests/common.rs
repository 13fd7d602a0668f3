pub mod writer {
    //! Build Type 1 fonts in memory.
    #![allow(dead_code)]

    const EEXEC_SEED: u16 = 55665;
    const CHARSTRING_SEED: u16 = 4330;

    /// Assemble a charstring from its textual form, e.g. `"0 500 hsbw 10 hlineto endchar"`.
    pub fn charstring(program: &str) -> Vec<u8> {
        let mut data = Vec::new();
        for word in program.split_whitespace() {
            if let Ok(value) = word.parse::<i32>() {
                encode_number(value, &mut data);
                continue;
            }
            let op: &[u8] = match word {
                "hstem" => &[1],
                "vstem" => &[3],
                "vmoveto" => &[4],
                "rlineto" => &[5],
                "hlineto" => &[6],
                "vlineto" => &[7],
                "rrcurveto" => &[8],
                "closepath" => &[9],
                "callsubr" => &[10],
                "return" => &[11],
                "hsbw" => &[13],
                "endchar" => &[14],
                "rmoveto" => &[21],
                "hmoveto" => &[22],
                "vhcurveto" => &[30],
                "hvcurveto" => &[31],
                "dotsection" => &[12, 0],
                "vstem3" => &[12, 1],
                "hstem3" => &[12, 2],
                "seac" => &[12, 6],
                "sbw" => &[12, 7],
                "div" => &[12, 12],
                "callothersubr" => &[12, 16],
                "pop" => &[12, 17],
                "setcurrentpoint" => &[12, 33],
                _ => panic!("unknown charstring operator {}", word),
            };
            data.extend_from_slice(op);
        }
        data
    }

    pub fn encode_number(value: i32, data: &mut Vec<u8>) {
        match value {
            -107..=107 => data.push((value + 139) as u8),
            108..=1131 => {
                let value = value - 108;
                data.extend([(value / 256 + 247) as u8, (value % 256) as u8]);
            }
            -1131..=-108 => {
                let value = -value - 108;
                data.extend([(value / 256 + 251) as u8, (value % 256) as u8]);
            }
            _ => {
                data.push(255);
                data.extend(value.to_be_bytes());
            }
        }
    }

    pub fn encrypt(plain: &[u8], seed: u16) -> Vec<u8> {
        let mut key = seed;
        plain
            .iter()
            .map(|&plain| {
                let cipher = plain ^ (key >> 8) as u8;
                key = u16::from(cipher)
                    .wrapping_add(key)
                    .wrapping_mul(52845)
                    .wrapping_add(22719);
                cipher
            })
            .collect()
    }

    pub fn hex_encode(data: &[u8]) -> Vec<u8> {
        let mut hex = Vec::with_capacity(data.len() * 2 + data.len() / 32);
        for (i, byte) in data.iter().enumerate() {
            if i > 0 && i % 32 == 0 {
                hex.push(b'\n');
            }
            hex.extend(format!("{:02x}", byte).bytes());
        }
        hex
    }

    pub fn pfb_record(record_type: u8, data: &[u8]) -> Vec<u8> {
        let mut record = vec![0x80, record_type];
        record.extend((data.len() as u32).to_le_bytes());
        record.extend_from_slice(data);
        record
    }

    /// A Type 1 font under construction.
    ///
    /// Glyphs are given as textual charstrings, see `charstring`.
    #[derive(Clone)]
    pub struct FontBuilder {
        pub font_name: String,
        pub family_name: String,
        pub full_name: String,
        pub weight: String,
        pub italic_angle: f32,
        /// `None` for `StandardEncoding`.
        pub encoding: Option<Vec<(u8, String)>>,
        pub len_iv: i32,
        pub subrs: Vec<String>,
        pub glyphs: Vec<(String, String)>,
    }

    impl FontBuilder {
        pub fn new(font_name: &str) -> Self {
            FontBuilder {
                font_name: font_name.to_string(),
                family_name: String::new(),
                full_name: String::new(),
                weight: String::new(),
                italic_angle: 0.,
                encoding: None,
                len_iv: 4,
                subrs: Vec::new(),
                glyphs: Vec::new(),
            }
        }

        pub fn names(mut self, family_name: &str, full_name: &str, weight: &str) -> Self {
            self.family_name = family_name.to_string();
            self.full_name = full_name.to_string();
            self.weight = weight.to_string();
            self
        }

        pub fn glyph(mut self, name: &str, program: &str) -> Self {
            self.glyphs.push((name.to_string(), program.to_string()));
            self
        }

        pub fn subr(mut self, program: &str) -> Self {
            self.subrs.push(program.to_string());
            self
        }

        pub fn encode(mut self, code: u8, name: &str) -> Self {
            self.encoding
                .get_or_insert_with(Vec::new)
                .push((code, name.to_string()));
            self
        }

        /// The font dictionary, up to and including `eexec`.
        pub fn cleartext(&self) -> Vec<u8> {
            let mut text = format!(
                "%!PS-AdobeFont-1.0: {name} 001.000\n\
                 %%Title: {name}\n\
                 %%EndComments\n\
                 12 dict begin\n\
                 /FontInfo 9 dict dup begin\n\
                 /version (001.000) readonly def\n\
                 /Notice (Test font \\(not for use\\)) readonly def\n\
                 /Copyright (Copyright \\251 nobody) readonly def\n\
                 /FullName ({full}) readonly def\n\
                 /FamilyName ({family}) readonly def\n\
                 /Weight ({weight}) readonly def\n\
                 /ItalicAngle {angle} def\n\
                 /isFixedPitch false def\n\
                 /UnderlinePosition -100 def\n\
                 /UnderlineThickness 50 def\n\
                 end readonly def\n\
                 /FontName /{name} def\n",
                name = self.font_name,
                full = self.full_name,
                family = self.family_name,
                weight = self.weight,
                angle = self.italic_angle,
            );
            match &self.encoding {
                None => text.push_str("/Encoding StandardEncoding def\n"),
                Some(codes) => {
                    text.push_str(
                        "/Encoding 256 array\n0 1 255 {1 index exch /.notdef put} for\n",
                    );
                    for (code, name) in codes {
                        text.push_str(&format!("dup {} /{} put\n", code, name));
                    }
                    text.push_str("readonly def\n");
                }
            }
            text.push_str(
                "/PaintType 0 def\n\
                 /FontType 1 def\n\
                 /FontMatrix [0.001 0 0 0.001 0 0] readonly def\n\
                 /FontBBox {-10 -20 1000 900} readonly def\n\
                 /UniqueID 4000000 def\n\
                 currentdict end\n\
                 currentfile eexec\n",
            );
            text.into_bytes()
        }

        /// The private portion, before `eexec` encryption.
        pub fn private(&self) -> Vec<u8> {
            let mut data = Vec::new();
            data.extend_from_slice(
                b"dup /Private 8 dict dup begin\n\
                  /RD{string currentfile exch readstring pop}executeonly def\n\
                  /ND{noaccess def}executeonly def\n\
                  /NP{noaccess put}executeonly def\n\
                  /MinFeature{16 16}def\n\
                  /password 5839 def\n\
                  /BlueValues [-20 0 700 720] def\n",
            );
            data.extend(format!("/lenIV {} def\n", self.len_iv).bytes());
            data.extend(format!("/Subrs {} array\n", self.subrs.len()).bytes());
            for (index, subr) in self.subrs.iter().enumerate() {
                let bytes = self.encrypt_char_string(subr);
                data.extend(format!("dup {} {} RD ", index, bytes.len()).bytes());
                data.extend(bytes);
                data.extend_from_slice(b" NP\n");
            }
            data.extend_from_slice(b"ND\n");
            data.extend(format!("2 index /CharStrings {} dict dup begin\n", self.glyphs.len()).bytes());
            for (name, program) in &self.glyphs {
                let bytes = self.encrypt_char_string(program);
                data.extend(format!("/{} {} RD ", name, bytes.len()).bytes());
                data.extend(bytes);
                data.extend_from_slice(b" ND\n");
            }
            data.extend_from_slice(
                b"end\nend\nreadonly put\nnoaccess put\n\
                  dup/FontName get exch definefont pop\n\
                  mark currentfile closefile\n",
            );
            data
        }

        fn encrypt_char_string(&self, program: &str) -> Vec<u8> {
            let program = charstring(program);
            if self.len_iv < 0 {
                return program;
            }
            let mut plain = vec![0; self.len_iv as usize];
            plain.extend(program);
            encrypt(&plain, CHARSTRING_SEED)
        }

        fn encrypted_private(&self) -> Vec<u8> {
            let mut plain = b"\x0f\x1e\x2d\x3c".to_vec();
            plain.extend(self.private());
            encrypt(&plain, EEXEC_SEED)
        }

        fn trailer() -> Vec<u8> {
            let mut trailer = Vec::new();
            for _ in 0..8 {
                trailer.extend_from_slice(&[b'0'; 64]);
                trailer.push(b'\n');
            }
            trailer.extend_from_slice(b"cleartomark\n");
            trailer
        }

        pub fn pfa(&self) -> Vec<u8> {
            let mut data = self.cleartext();
            data.extend(hex_encode(&self.encrypted_private()));
            data.push(b'\n');
            data.extend(Self::trailer());
            data
        }

        pub fn pfb(&self) -> Vec<u8> {
            let mut data = pfb_record(1, &self.cleartext());
            data.extend(pfb_record(2, &self.encrypted_private()));
            data.extend(pfb_record(1, &Self::trailer()));
            data.extend([0x80, 3]);
            data
        }
    }
}
