// Built-in calling code and area code data.
//
// Country entries follow ITU-T E.164 country calling codes. The United States
// and Canada share calling code 1, so both are keyed by their four-digit
// NANP prefixes ("1" + area code) instead of the bare "1".
//
// Area entries are city or region prefixes including the calling code. Some
// prefixes are listed under more than one area (overlay codes, shared city
// codes). Lookups resolve those to the first area declared, see
// `PrefixTable::ambiguous_prefixes`.

use crate::prefixes::{RawArea, RawCountry};

const fn area(name: &'static str, prefixes: &'static [&'static str]) -> RawArea {
    RawArea { name, prefixes }
}

pub(crate) const BUILTIN_COUNTRIES: &[RawCountry] = &[
    RawCountry {
        name: "美国",
        iso: "US",
        calling_codes: &[
            "1201", "1202", "1203", "1205", "1206", "1207", "1208", "1209", "1210", "1212",
            "1213", "1214", "1215", "1216", "1217", "1218", "1219", "1224", "1225", "1228",
            "1229", "1231", "1234", "1239", "1240", "1248", "1251", "1252", "1253", "1254",
            "1256", "1260", "1262", "1267", "1269", "1270", "1276", "1281", "1301", "1302",
            "1303", "1304", "1305", "1307", "1308", "1309", "1310", "1312", "1313", "1314",
            "1315", "1316", "1317", "1318", "1319", "1320", "1321", "1323", "1325", "1330",
            "1331", "1334", "1336", "1337", "1339", "1341", "1347", "1351", "1352", "1360",
            "1361", "1364", "1380", "1385", "1386", "1401", "1402", "1404", "1405", "1406",
            "1407", "1408", "1409", "1410", "1412", "1413", "1414", "1415", "1417", "1419",
            "1423", "1424", "1425", "1430", "1432", "1434", "1435", "1440", "1442", "1443",
            "1458", "1463", "1464", "1469", "1470", "1475", "1478", "1479", "1480", "1484",
            "1501", "1502", "1503", "1504", "1505", "1507", "1508", "1509", "1510", "1512",
            "1513", "1515", "1516", "1517", "1518", "1520", "1530", "1531", "1534", "1539",
            "1540", "1541", "1551", "1559", "1561", "1562", "1563", "1564", "1567", "1570",
            "1571", "1573", "1574", "1575", "1580", "1585", "1586", "1601", "1602", "1603",
            "1605", "1606", "1607", "1608", "1609", "1610", "1612", "1614", "1615", "1616",
            "1617", "1618", "1619", "1620", "1623", "1626", "1628", "1629", "1630", "1631",
            "1636", "1641", "1646", "1650", "1651", "1657", "1660", "1661", "1662", "1667",
            "1669", "1678", "1681", "1682", "1689", "1701", "1702", "1703", "1704", "1706",
            "1707", "1708", "1712", "1713", "1714", "1715", "1716", "1717", "1718", "1719",
            "1720", "1724", "1725", "1727", "1731", "1732", "1734", "1737", "1740", "1743",
            "1747", "1754", "1757", "1760", "1762", "1763", "1764", "1765", "1769", "1770",
            "1772", "1773", "1774", "1775", "1779", "1781", "1785", "1786", "1801", "1802",
            "1803", "1804", "1805", "1806", "1810", "1812", "1813", "1814", "1815", "1816",
            "1817", "1818", "1828", "1830", "1831", "1832", "1843", "1845", "1847", "1848",
            "1850", "1856", "1857", "1858", "1859", "1860", "1862", "1863", "1864", "1865",
            "1870", "1872", "1878", "1901", "1903", "1904", "1906", "1907", "1908", "1909",
            "1910", "1912", "1913", "1914", "1915", "1916", "1917", "1918", "1919", "1920",
            "1925", "1928", "1929", "1930", "1931", "1934", "1936", "1937", "1940", "1941",
            "1947", "1949", "1951", "1952", "1954", "1956", "1959", "1970", "1971", "1972",
            "1973", "1978", "1979", "1980", "1984", "1985", "1989", "1279", "1445", "1726",
            "1808", "1854", "1935", "1938", "1943",
        ],
        areas: US_AREAS,
    },
    RawCountry {
        name: "加拿大",
        iso: "CA",
        calling_codes: &[
            "1403", "1587", "1825", "1236", "1250", "1604", "1672", "1778", "1204", "1431",
            "1506", "1709", "1782", "1902", "1226", "1249", "1289", "1343", "1365", "1416",
            "1437", "1519", "1548", "1613", "1647", "1705", "1807", "1905", "1418", "1438",
            "1450", "1514", "1579", "1581", "1819", "1873", "1306", "1639", "1867", "1780",
        ],
        areas: CA_AREAS,
    },
    RawCountry { name: "俄罗斯", iso: "RU", calling_codes: &["7"], areas: &[] },
    RawCountry { name: "埃及", iso: "EG", calling_codes: &["20"], areas: &[] },
    RawCountry { name: "南非", iso: "ZA", calling_codes: &["27"], areas: &[] },
    RawCountry { name: "希腊", iso: "GR", calling_codes: &["30"], areas: &[] },
    RawCountry { name: "荷兰", iso: "NL", calling_codes: &["31"], areas: &[] },
    RawCountry { name: "比利时", iso: "BE", calling_codes: &["32"], areas: &[] },
    RawCountry { name: "法国", iso: "FR", calling_codes: &["33"], areas: FR_AREAS },
    RawCountry { name: "西班牙", iso: "ES", calling_codes: &["34"], areas: &[] },
    RawCountry { name: "匈牙利", iso: "HU", calling_codes: &["36"], areas: &[] },
    RawCountry { name: "意大利", iso: "IT", calling_codes: &["39"], areas: &[] },
    RawCountry { name: "罗马尼亚", iso: "RO", calling_codes: &["40"], areas: &[] },
    RawCountry { name: "瑞士", iso: "CH", calling_codes: &["41"], areas: &[] },
    RawCountry { name: "奥地利", iso: "AT", calling_codes: &["43"], areas: &[] },
    RawCountry { name: "英国", iso: "GB", calling_codes: &["44"], areas: GB_AREAS },
    RawCountry { name: "丹麦", iso: "DK", calling_codes: &["45"], areas: &[] },
    RawCountry { name: "瑞典", iso: "SE", calling_codes: &["46"], areas: &[] },
    RawCountry { name: "挪威", iso: "NO", calling_codes: &["47"], areas: &[] },
    RawCountry { name: "波兰", iso: "PL", calling_codes: &["48"], areas: &[] },
    RawCountry { name: "德国", iso: "DE", calling_codes: &["49"], areas: DE_AREAS },
    RawCountry { name: "秘鲁", iso: "PE", calling_codes: &["51"], areas: &[] },
    RawCountry { name: "墨西哥", iso: "MX", calling_codes: &["52"], areas: &[] },
    RawCountry { name: "古巴", iso: "CU", calling_codes: &["53"], areas: &[] },
    RawCountry { name: "阿根廷", iso: "AR", calling_codes: &["54"], areas: &[] },
    RawCountry { name: "巴西", iso: "BR", calling_codes: &["55"], areas: &[] },
    RawCountry { name: "智利", iso: "CL", calling_codes: &["56"], areas: &[] },
    RawCountry { name: "哥伦比亚", iso: "CO", calling_codes: &["57"], areas: &[] },
    RawCountry { name: "委内瑞拉", iso: "VE", calling_codes: &["58"], areas: &[] },
    RawCountry { name: "马来西亚", iso: "MY", calling_codes: &["60"], areas: &[] },
    RawCountry { name: "澳大利亚", iso: "AU", calling_codes: &["61"], areas: AU_AREAS },
    RawCountry { name: "印度尼西亚", iso: "ID", calling_codes: &["62"], areas: &[] },
    RawCountry { name: "菲律宾", iso: "PH", calling_codes: &["63"], areas: &[] },
    RawCountry { name: "新西兰", iso: "NZ", calling_codes: &["64"], areas: &[] },
    RawCountry { name: "新加坡", iso: "SG", calling_codes: &["65"], areas: &[] },
    RawCountry { name: "泰国", iso: "TH", calling_codes: &["66"], areas: &[] },
    RawCountry { name: "日本", iso: "JP", calling_codes: &["81"], areas: JP_AREAS },
    RawCountry { name: "韩国", iso: "KR", calling_codes: &["82"], areas: KR_AREAS },
    RawCountry { name: "越南", iso: "VN", calling_codes: &["84"], areas: &[] },
    RawCountry { name: "中国", iso: "CN", calling_codes: &["86"], areas: &[] },
    RawCountry { name: "土耳其", iso: "TR", calling_codes: &["90"], areas: &[] },
    RawCountry { name: "印度", iso: "IN", calling_codes: &["91"], areas: IN_AREAS },
    RawCountry { name: "巴基斯坦", iso: "PK", calling_codes: &["92"], areas: &[] },
    RawCountry { name: "阿富汗", iso: "AF", calling_codes: &["93"], areas: &[] },
    RawCountry { name: "斯里兰卡", iso: "LK", calling_codes: &["94"], areas: &[] },
    RawCountry { name: "缅甸", iso: "MM", calling_codes: &["95"], areas: &[] },
    RawCountry { name: "伊朗", iso: "IR", calling_codes: &["98"], areas: &[] },
    RawCountry { name: "摩洛哥", iso: "MA", calling_codes: &["212"], areas: &[] },
    RawCountry { name: "阿尔及利亚", iso: "DZ", calling_codes: &["213"], areas: &[] },
    RawCountry { name: "突尼斯", iso: "TN", calling_codes: &["216"], areas: &[] },
    RawCountry { name: "利比亚", iso: "LY", calling_codes: &["218"], areas: &[] },
    RawCountry { name: "尼日利亚", iso: "NG", calling_codes: &["234"], areas: &[] },
    RawCountry { name: "肯尼亚", iso: "KE", calling_codes: &["254"], areas: &[] },
    RawCountry { name: "坦桑尼亚", iso: "TZ", calling_codes: &["255"], areas: &[] },
    RawCountry { name: "乌干达", iso: "UG", calling_codes: &["256"], areas: &[] },
    RawCountry { name: "津巴布韦", iso: "ZW", calling_codes: &["263"], areas: &[] },
    RawCountry { name: "葡萄牙", iso: "PT", calling_codes: &["351"], areas: &[] },
    RawCountry { name: "卢森堡", iso: "LU", calling_codes: &["352"], areas: &[] },
    RawCountry { name: "爱尔兰", iso: "IE", calling_codes: &["353"], areas: &[] },
    RawCountry { name: "冰岛", iso: "IS", calling_codes: &["354"], areas: &[] },
    RawCountry { name: "阿尔巴尼亚", iso: "AL", calling_codes: &["355"], areas: &[] },
    RawCountry { name: "马耳他", iso: "MT", calling_codes: &["356"], areas: &[] },
    RawCountry { name: "芬兰", iso: "FI", calling_codes: &["358"], areas: &[] },
    RawCountry { name: "保加利亚", iso: "BG", calling_codes: &["359"], areas: &[] },
    RawCountry { name: "立陶宛", iso: "LT", calling_codes: &["370"], areas: &[] },
    RawCountry { name: "拉脱维亚", iso: "LV", calling_codes: &["371"], areas: &[] },
    RawCountry { name: "爱沙尼亚", iso: "EE", calling_codes: &["372"], areas: &[] },
    RawCountry { name: "摩尔多瓦", iso: "MD", calling_codes: &["373"], areas: &[] },
    RawCountry { name: "白俄罗斯", iso: "BY", calling_codes: &["375"], areas: &[] },
    RawCountry { name: "乌克兰", iso: "UA", calling_codes: &["380"], areas: &[] },
    RawCountry { name: "塞尔维亚", iso: "RS", calling_codes: &["381"], areas: &[] },
    RawCountry { name: "黑山", iso: "ME", calling_codes: &["382"], areas: &[] },
    RawCountry { name: "克罗地亚", iso: "HR", calling_codes: &["385"], areas: &[] },
    RawCountry { name: "斯洛文尼亚", iso: "SI", calling_codes: &["386"], areas: &[] },
    RawCountry { name: "波黑", iso: "BA", calling_codes: &["387"], areas: &[] },
    RawCountry { name: "马其顿", iso: "MK", calling_codes: &["389"], areas: &[] },
    RawCountry { name: "捷克", iso: "CZ", calling_codes: &["420"], areas: &[] },
    RawCountry { name: "斯洛伐克", iso: "SK", calling_codes: &["421"], areas: &[] },
    RawCountry { name: "以色列", iso: "IL", calling_codes: &["972"], areas: &[] },
    RawCountry { name: "阿联酋", iso: "AE", calling_codes: &["971"], areas: &[] },
    RawCountry { name: "沙特阿拉伯", iso: "SA", calling_codes: &["966"], areas: &[] },
];

const US_AREAS: &[RawArea] = &[
    area("纽约州", &["1212", "1315", "1347", "1516", "1518", "1585", "1607", "1631", "1646", "1716", "1718", "1845", "1914", "1917", "1929"]),
    area("加利福尼亚州-洛杉矶", &["1213", "1310", "1323", "1424", "1562", "1626", "1747", "1818"]),
    area("伊利诺伊州-芝加哥", &["1312", "1224", "1331", "1630", "1708", "1773", "1779", "1847", "1872"]),
    area("德克萨斯州-休斯顿", &["1281", "1713", "1832"]),
    area("亚利桑那州-凤凰城", &["1480", "1602", "1623", "1928"]),
    area("宾夕法尼亚州-费城", &["1215", "1267", "1445", "1484", "1610", "1717", "1724", "1814", "1878"]),
    area("德克萨斯州-圣安东尼奥", &["1210", "1726", "1830"]),
    area("加利福尼亚州-圣地亚哥", &["1619", "1858", "1935"]),
    area("德克萨斯州-达拉斯", &["1214", "1469", "1972"]),
    area("加利福尼亚州-圣何塞", &["1408", "1669"]),
    area("德克萨斯州-奥斯汀", &["1512", "1737"]),
    area("佛罗里达州-杰克逊维尔", &["1904"]),
    area("加利福尼亚州-旧金山", &["1415", "1628", "1650"]),
    area("印第安纳州", &["1317", "1463", "1765", "1812"]),
    area("俄亥俄州-哥伦布", &["1380", "1614", "1740"]),
    area("德克萨斯州-沃斯堡", &["1682", "1817"]),
    area("北卡罗来纳州-夏洛特", &["1704", "1980"]),
    area("华盛顿州-西雅图", &["1206", "1253", "1360", "1425", "1564"]),
    area("科罗拉多州-丹佛", &["1303", "1720", "1970"]),
    area("华盛顿特区", &["1202"]),
    area("马萨诸塞州-波士顿", &["1339", "1351", "1413", "1508", "1617", "1774", "1781", "1857", "1978"]),
    area("密歇根州-底特律", &["1248", "1313", "1586", "1734", "1810", "1947"]),
    area("田纳西州", &["1423", "1615", "1629", "1731", "1865", "1901", "1931"]),
    area("俄克拉荷马州", &["1405", "1539", "1580", "1918"]),
    area("俄勒冈州-波特兰", &["1503", "1971"]),
    area("内华达州-拉斯维加斯", &["1702", "1725"]),
    area("威斯康星州-密尔沃基", &["1262", "1414", "1534"]),
    area("新墨西哥州-阿尔伯克基", &["1505", "1575"]),
    area("亚利桑那州-图森", &["1520"]),
    area("加利福尼亚州-弗雷斯诺", &["1559"]),
    area("加利福尼亚州-萨克拉门托", &["1279", "1530", "1916"]),
    area("密苏里州-堪萨斯城", &["1816"]),
    area("亚利桑那州-梅萨", &["1480"]),
    area("佐治亚州-亚特兰大", &["1404", "1470", "1678", "1770", "1943"]),
    area("科罗拉多州-科罗拉多斯普林斯", &["1719"]),
    area("北卡罗来纳州-罗利", &["1919", "1984"]),
    area("佛罗里达州-迈阿密", &["1305", "1786", "1954"]),
    area("加利福尼亚州-长滩", &["1562"]),
    area("弗吉尼亚州", &["1757", "1703", "1571", "1804"]),
    area("内布拉斯加州-奥马哈", &["1402", "1531"]),
    area("加利福尼亚州-奥克兰", &["1510"]),
    area("明尼苏达州", &["1320", "1507", "1612", "1651", "1763", "1952"]),
    area("俄克拉荷马州-塔尔萨", &["1918"]),
    area("德克萨斯州-阿灵顿", &["1817"]),
    area("路易斯安那州-新奥尔良", &["1504"]),
    area("俄亥俄州-克利夫兰", &["1216", "1440"]),
    area("俄亥俄州-辛辛那提", &["1513"]),
    area("堪萨斯州", &["1316", "1620", "1785", "1913"]),
    area("佛罗里达州-坦帕", &["1813", "1727"]),
    area("佛罗里达州-奥兰多", &["1407", "1321", "1689"]),
    area("路易斯安那州-巴吞鲁日", &["1225"]),
    area("密西西比州", &["1228", "1601", "1662", "1769"]),
    area("阿拉巴马州", &["1205", "1251", "1256", "1334", "1938"]),
    area("南卡罗来纳州", &["1803", "1843", "1854", "1864"]),
    area("肯塔基州", &["1270", "1502", "1606", "1859"]),
    area("爱荷华州", &["1319", "1515", "1563", "1641", "1712"]),
    area("阿肯色州", &["1479", "1501", "1870"]),
    area("犹他州", &["1385", "1801"]),
    area("内华达州-雷诺", &["1775"]),
    area("康涅狄格州", &["1203", "1475", "1860", "1959"]),
    area("新泽西州", &["1201", "1551", "1609", "1732", "1848", "1856", "1862", "1908", "1973"]),
    area("罗德岛州", &["1401"]),
    area("新罕布什尔州", &["1603"]),
    area("缅因州", &["1207"]),
    area("佛蒙特州", &["1802"]),
    area("特拉华州", &["1302"]),
    area("西弗吉尼亚州", &["1304"]),
    area("怀俄明州", &["1307"]),
    area("蒙大拿州", &["1406"]),
    area("南达科他州", &["1605"]),
    area("北达科他州", &["1701"]),
    area("阿拉斯加州", &["1907"]),
    area("夏威夷州", &["1808"]),
    area("爱达荷州", &["1208"]),
];

const CA_AREAS: &[RawArea] = &[
    area("安大略省-多伦多", &["1416", "1437", "1647", "1905"]),
    area("魁北克省-蒙特利尔", &["1438", "1514", "1450"]),
    area("不列颠哥伦比亚省-温哥华", &["1604", "1778", "1236"]),
    area("阿尔伯塔省-卡尔加里", &["1403", "1587", "1825"]),
    area("阿尔伯塔省-埃德蒙顿", &["1780", "1825"]),
    area("安大略省-渥太华", &["1343", "1613", "1819"]),
    area("魁北克省-魁北克城", &["1418", "1581", "1873"]),
    area("马尼托巴省-温尼伯", &["1204", "1431"]),
    area("新斯科舍省-哈利法克斯", &["1782", "1902"]),
    area("不列颠哥伦比亚省-维多利亚", &["1250", "1672"]),
    area("安大略省-汉密尔顿", &["1289", "1905"]),
    area("安大略省-伦敦", &["1226", "1519"]),
    area("安大略省-温莎", &["1519", "1226"]),
    area("萨斯喀彻温省-里贾纳", &["1306", "1639"]),
    area("萨斯喀彻温省-萨斯卡通", &["1306", "1639"]),
    area("新不伦瑞克省", &["1506"]),
    area("纽芬兰和拉布拉多省", &["1709"]),
    area("爱德华王子岛省", &["1902"]),
    area("育空地区", &["1867"]),
    area("西北地区", &["1867"]),
    area("努纳武特地区", &["1867"]),
];

const FR_AREAS: &[RawArea] = &[
    area("巴黎", &["331"]),
    area("马赛", &["334"]),
    area("里昂", &["334"]),
    area("图卢兹", &["335"]),
    area("尼斯", &["334"]),
    area("南特", &["332"]),
    area("斯特拉斯堡", &["333"]),
];

const GB_AREAS: &[RawArea] = &[
    area("伦敦", &["4420"]),
    area("曼彻斯特", &["44161"]),
    area("伯明翰", &["44121"]),
    area("利兹", &["44113"]),
    area("格拉斯哥", &["44141"]),
    area("爱丁堡", &["44131"]),
    area("利物浦", &["44151"]),
    area("布里斯托", &["44117"]),
    area("谢菲尔德", &["44114"]),
    area("纽卡斯尔", &["44191"]),
    area("贝尔法斯特", &["4428"]),
    area("卡迪夫", &["4429"]),
];

const DE_AREAS: &[RawArea] = &[
    area("柏林", &["4930"]),
    area("慕尼黑", &["4989"]),
    area("汉堡", &["4940"]),
    area("法兰克福", &["4969"]),
    area("科隆", &["49221"]),
    area("斯图加特", &["49711"]),
    area("杜塞尔多夫", &["49211"]),
    area("多特蒙德", &["49231"]),
];

const AU_AREAS: &[RawArea] = &[
    area("悉尼", &["612"]),
    area("墨尔本", &["613"]),
    area("布里斯班", &["617"]),
    area("珀斯", &["618"]),
    area("阿德莱德", &["618"]),
    area("堪培拉", &["612"]),
];

const JP_AREAS: &[RawArea] = &[
    area("东京", &["813"]),
    area("大阪", &["816"]),
    area("名古屋", &["8152"]),
    area("札幌", &["8111"]),
    area("福冈", &["8192"]),
    area("京都", &["8175"]),
    area("横滨", &["8145"]),
];

const KR_AREAS: &[RawArea] = &[
    area("首尔", &["822"]),
    area("釜山", &["8251"]),
    area("仁川", &["8232"]),
    area("大邱", &["8253"]),
    area("大田", &["8242"]),
    area("光州", &["8262"]),
    area("蔚山", &["8252"]),
];

const IN_AREAS: &[RawArea] = &[
    area("德里", &["9111"]),
    area("孟买", &["9122"]),
    area("班加罗尔", &["9180"]),
    area("海得拉巴", &["9140"]),
    area("艾哈迈达巴德", &["9179"]),
    area("金奈", &["9144"]),
    area("加尔各答", &["9133"]),
    area("浦那", &["9120"]),
];
