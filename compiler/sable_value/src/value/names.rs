//! CSS colour keywords.

/// Keyword to channels, sorted by name for binary search.
///
/// `transparent` is handled separately since it is the only keyword with
/// an alpha below 1.
pub(super) const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

/// Packed `0xRRGGBB` to the keyword printed for it, sorted by key.
///
/// Where several keywords share a value (`aqua`/`cyan`, `gray`/`grey`) the
/// one listed here wins.
pub(super) const COLOR_NAMES: &[(u32, &str)] = &[
    (0x000000, "black"),
    (0x000080, "navy"),
    (0x00008B, "darkblue"),
    (0x0000CD, "mediumblue"),
    (0x0000FF, "blue"),
    (0x006400, "darkgreen"),
    (0x008000, "green"),
    (0x008080, "teal"),
    (0x008B8B, "darkcyan"),
    (0x00BFFF, "deepskyblue"),
    (0x00CED1, "darkturquoise"),
    (0x00FA9A, "mediumspringgreen"),
    (0x00FF00, "lime"),
    (0x00FF7F, "springgreen"),
    (0x00FFFF, "cyan"),
    (0x191970, "midnightblue"),
    (0x1E90FF, "dodgerblue"),
    (0x20B2AA, "lightseagreen"),
    (0x228B22, "forestgreen"),
    (0x2E8B57, "seagreen"),
    (0x2F4F4F, "darkslategray"),
    (0x32CD32, "limegreen"),
    (0x3CB371, "mediumseagreen"),
    (0x40E0D0, "turquoise"),
    (0x4169E1, "royalblue"),
    (0x4682B4, "steelblue"),
    (0x483D8B, "darkslateblue"),
    (0x48D1CC, "mediumturquoise"),
    (0x4B0082, "indigo"),
    (0x556B2F, "darkolivegreen"),
    (0x5F9EA0, "cadetblue"),
    (0x6495ED, "cornflowerblue"),
    (0x663399, "rebeccapurple"),
    (0x66CDAA, "mediumaquamarine"),
    (0x696969, "dimgray"),
    (0x6A5ACD, "slateblue"),
    (0x6B8E23, "olivedrab"),
    (0x708090, "slategray"),
    (0x778899, "lightslategray"),
    (0x7B68EE, "mediumslateblue"),
    (0x7CFC00, "lawngreen"),
    (0x7FFF00, "chartreuse"),
    (0x7FFFD4, "aquamarine"),
    (0x800000, "maroon"),
    (0x800080, "purple"),
    (0x808000, "olive"),
    (0x808080, "gray"),
    (0x87CEEB, "skyblue"),
    (0x87CEFA, "lightskyblue"),
    (0x8A2BE2, "blueviolet"),
    (0x8B0000, "darkred"),
    (0x8B008B, "darkmagenta"),
    (0x8B4513, "saddlebrown"),
    (0x8FBC8F, "darkseagreen"),
    (0x90EE90, "lightgreen"),
    (0x9370DB, "mediumpurple"),
    (0x9400D3, "darkviolet"),
    (0x98FB98, "palegreen"),
    (0x9932CC, "darkorchid"),
    (0x9ACD32, "yellowgreen"),
    (0xA0522D, "sienna"),
    (0xA52A2A, "brown"),
    (0xA9A9A9, "darkgray"),
    (0xADD8E6, "lightblue"),
    (0xADFF2F, "greenyellow"),
    (0xAFEEEE, "paleturquoise"),
    (0xB0C4DE, "lightsteelblue"),
    (0xB0E0E6, "powderblue"),
    (0xB22222, "firebrick"),
    (0xB8860B, "darkgoldenrod"),
    (0xBA55D3, "mediumorchid"),
    (0xBC8F8F, "rosybrown"),
    (0xBDB76B, "darkkhaki"),
    (0xC0C0C0, "silver"),
    (0xC71585, "mediumvioletred"),
    (0xCD5C5C, "indianred"),
    (0xCD853F, "peru"),
    (0xD2691E, "chocolate"),
    (0xD2B48C, "tan"),
    (0xD3D3D3, "lightgray"),
    (0xD8BFD8, "thistle"),
    (0xDA70D6, "orchid"),
    (0xDAA520, "goldenrod"),
    (0xDB7093, "palevioletred"),
    (0xDC143C, "crimson"),
    (0xDCDCDC, "gainsboro"),
    (0xDDA0DD, "plum"),
    (0xDEB887, "burlywood"),
    (0xE0FFFF, "lightcyan"),
    (0xE6E6FA, "lavender"),
    (0xE9967A, "darksalmon"),
    (0xEE82EE, "violet"),
    (0xEEE8AA, "palegoldenrod"),
    (0xF08080, "lightcoral"),
    (0xF0E68C, "khaki"),
    (0xF0F8FF, "aliceblue"),
    (0xF0FFF0, "honeydew"),
    (0xF0FFFF, "azure"),
    (0xF4A460, "sandybrown"),
    (0xF5DEB3, "wheat"),
    (0xF5F5DC, "beige"),
    (0xF5F5F5, "whitesmoke"),
    (0xF5FFFA, "mintcream"),
    (0xF8F8FF, "ghostwhite"),
    (0xFA8072, "salmon"),
    (0xFAEBD7, "antiquewhite"),
    (0xFAF0E6, "linen"),
    (0xFAFAD2, "lightgoldenrodyellow"),
    (0xFDF5E6, "oldlace"),
    (0xFF0000, "red"),
    (0xFF00FF, "magenta"),
    (0xFF1493, "deeppink"),
    (0xFF4500, "orangered"),
    (0xFF6347, "tomato"),
    (0xFF69B4, "hotpink"),
    (0xFF7F50, "coral"),
    (0xFF8C00, "darkorange"),
    (0xFFA07A, "lightsalmon"),
    (0xFFA500, "orange"),
    (0xFFB6C1, "lightpink"),
    (0xFFC0CB, "pink"),
    (0xFFD700, "gold"),
    (0xFFDAB9, "peachpuff"),
    (0xFFDEAD, "navajowhite"),
    (0xFFE4B5, "moccasin"),
    (0xFFE4C4, "bisque"),
    (0xFFE4E1, "mistyrose"),
    (0xFFEBCD, "blanchedalmond"),
    (0xFFEFD5, "papayawhip"),
    (0xFFF0F5, "lavenderblush"),
    (0xFFF5EE, "seashell"),
    (0xFFF8DC, "cornsilk"),
    (0xFFFACD, "lemonchiffon"),
    (0xFFFAF0, "floralwhite"),
    (0xFFFAFA, "snow"),
    (0xFFFF00, "yellow"),
    (0xFFFFE0, "lightyellow"),
    (0xFFFFF0, "ivory"),
    (0xFFFFFF, "white"),
];
